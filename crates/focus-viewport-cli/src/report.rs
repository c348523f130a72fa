//! Frame output

use std::io::Write;

use anyhow::Result;
use focus_viewport::{Blur, BorderEmphasis, CameraCommand, ContentTier, FocusState, RenderFrame};
use serde::Serialize;

use crate::script::ScriptEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One block per frame, one line per node
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Serialize)]
struct JsonStep<'a> {
    step: usize,
    /// None for the initial frame
    event: Option<&'a ScriptEvent>,
    frame: &'a RenderFrame,
}

pub fn write_frame(
    out: &mut impl Write,
    format: OutputFormat,
    step: usize,
    event: Option<&ScriptEvent>,
    frame: &RenderFrame,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &JsonStep { step, event, frame })?;
            writeln!(out)?;
        }
        OutputFormat::Text => out.write_all(render_text(step, event, frame).as_bytes())?,
    }
    Ok(())
}

pub fn render_text(step: usize, event: Option<&ScriptEvent>, frame: &RenderFrame) -> String {
    let focus = match &frame.focus {
        FocusState::Overview => "overview".to_string(),
        FocusState::Focused(id) => format!("focused {id}"),
    };
    let event = event.map_or_else(|| "start".to_string(), ToString::to_string);
    let mut text = format!(
        "[{step:>3}] {event:<20} zoom {:.2}  {focus}  camera ({:.0}, {:.0}) x{:.2}\n",
        frame.global_zoom, frame.camera_pose.center.x, frame.camera_pose.center.y, frame.camera_pose.zoom,
    );
    if let Some(cmd) = &frame.camera {
        text.push_str(&format!("      {}\n", describe_command(cmd)));
    }

    for annotated in &frame.nodes {
        let d = &annotated.directive;
        let marker = if d.focused { '*' } else { ' ' };
        let tier = match d.tier {
            ContentTier::Placeholder => "placeholder",
            ContentTier::Detail => "detail",
        };
        let border = match d.style.border {
            BorderEmphasis::Normal => "",
            BorderEmphasis::Strong => " strong",
        };
        let blur = match d.style.blur {
            Blur::None => "",
            Blur::Strong => " blur",
        };
        text.push_str(&format!(
            "    {marker} {:<6} ez {:.2}  blocks {}/{}  {tier}{border}{blur}  opacity {:.2}\n",
            d.node_id.as_str(),
            d.effective_zoom,
            d.visible_block_count,
            annotated.node.content.len(),
            d.style.opacity,
        ));
    }
    text
}

fn describe_command(cmd: &CameraCommand) -> String {
    format!(
        "camera #{} {:?} -> ({:.0}, {:.0}) x{:.2} over {}ms",
        cmd.generation, cmd.reason, cmd.target.center_x, cmd.target.center_y, cmd.target.zoom, cmd.target.duration_ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;
    use focus_viewport::{ClickTarget, DiagramNode, NodeContent, NodeId, Viewport};

    fn frame_after_click() -> RenderFrame {
        let nodes = vec![
            DiagramNode::new("1", Pos2::new(750.0, 300.0), NodeContent::with_title("heading 1", &["p"])),
            DiagramNode::new("2", Pos2::new(200.0, 100.0), NodeContent::with_title("heading 2", &["p"])),
        ];
        let mut vp = Viewport::with_defaults(nodes, vec![]);
        vp.handle_click(ClickTarget::Node(NodeId::from("1")))
    }

    #[test]
    fn test_text_marks_focused_node_and_command() {
        let frame = frame_after_click();
        let text = render_text(1, Some(&ScriptEvent::Click(NodeId::from("1"))), &frame);

        assert!(text.contains("focused 1"));
        assert!(text.contains("camera #1 Focus -> (750, 300) x0.50 over 1000ms"));
        assert!(text.contains("* 1 "));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_json_is_one_line_per_frame() {
        let frame = frame_after_click();
        let mut out = Vec::new();
        write_frame(&mut out, OutputFormat::Json, 1, Some(&ScriptEvent::Background), &frame).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["step"], 1);
        assert_eq!(value["frame"]["camera"]["reason"], "focus");
    }

    #[test]
    fn test_initial_frame_is_labelled_start() {
        let frame = frame_after_click();
        let text = render_text(0, None, &frame);
        assert!(text.starts_with("[  0] start"));
    }
}
