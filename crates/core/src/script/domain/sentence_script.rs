use crate::transcript::domain::segment::Segment;

use super::layout::SentenceLayout;
use super::script_document::{color_literal, quote, ScriptDocument};

/// Generates the sentence-mode caption script: one centered text element
/// and one background solid per segment, shown over the segment's
/// `[start, end]` interval with fades at both edges.
pub struct SentenceScriptGenerator {
    layout: SentenceLayout,
}

impl SentenceScriptGenerator {
    pub fn new(layout: SentenceLayout) -> Self {
        Self { layout }
    }

    pub fn generate(&self, segments: &[Segment]) -> ScriptDocument {
        let mut doc = ScriptDocument::new();
        self.emit_header(&mut doc);
        for (idx, seg) in segments.iter().enumerate() {
            self.emit_segment(&mut doc, idx, seg);
        }
        doc
    }

    fn emit_header(&self, doc: &mut ScriptDocument) {
        let l = &self.layout;
        doc.push("var comp = app.project.activeItem;");
        doc.push("if (!comp || !(comp instanceof CompItem)) { alert(\"Please select a composition.\"); }");
        doc.push(format!("var fadeDuration = {};", l.fade_frames));
        doc.push(format!("var bgOpacity = {};", l.bg_opacity));
        doc.push(format!("var fontSize = {};", l.font_size));
        doc.push(format!("var yPos = comp.height * {};", l.y_fraction));
        doc.push(format!("var margin = {};", l.margin));
        doc.push(format!("var textColor = {};", color_literal(l.text_color)));
        doc.push(format!("var bgColor = {};", color_literal(l.bg_color)));
        doc.push("var compWidth = comp.width;");
        doc.push("var compHeight = comp.height;");
        // Clamped to half the element duration so keyframes stay monotonic
        // for elements shorter than two fade windows.
        doc.push("function fadeTime(duration) { return Math.min(fadeDuration / comp.frameRate, duration / 2); }");
    }

    fn emit_segment(&self, doc: &mut ScriptDocument, idx: usize, seg: &Segment) {
        let text = quote(&seg.text);
        let start = seg.start;
        let end = seg.end;
        let dur = seg.duration();

        doc.push(format!("// Sentence {}", idx + 1));
        doc.push(format!("var textLayer = comp.layers.addText({text});"));
        doc.push("textLayer.property(\"Position\").setValue([compWidth/2, yPos]);");
        doc.push("var textProp = textLayer.property(\"Source Text\");");
        doc.push("var textDocument = textProp.value;");
        doc.push("textDocument.fontSize = fontSize;");
        doc.push("textDocument.fillColor = textColor;");
        doc.push("textDocument.justification = ParagraphJustification.CENTER_JUSTIFY;");
        doc.push("textProp.setValue(textDocument);");
        doc.push("var bgLayer = comp.layers.addSolid(bgColor, \"BG\", compWidth, fontSize*2, 1);");
        doc.push("bgLayer.property(\"Transform\").property(\"Position\").setValue([compWidth/2, yPos]);");
        doc.push("bgLayer.property(\"Transform\").property(\"Opacity\").setValue(bgOpacity);");
        doc.push("bgLayer.moveAfter(textLayer);");
        doc.push(format!("textLayer.inPoint = {start};"));
        doc.push(format!("bgLayer.inPoint = {start};"));
        doc.push(format!("textLayer.outPoint = {end};"));
        doc.push(format!("bgLayer.outPoint = {end};"));
        doc.push(format!("textLayer.opacity.setValueAtTime({start}, 0);"));
        doc.push(format!(
            "textLayer.opacity.setValueAtTime({start} + fadeTime({dur}), 100);"
        ));
        doc.push(format!(
            "textLayer.opacity.setValueAtTime({end} - fadeTime({dur}), 100);"
        ));
        doc.push(format!("textLayer.opacity.setValueAtTime({end}, 0);"));
        doc.push(format!("bgLayer.opacity.setValueAtTime({start}, 0);"));
        doc.push(format!(
            "bgLayer.opacity.setValueAtTime({start} + fadeTime({dur}), bgOpacity);"
        ));
        doc.push(format!(
            "bgLayer.opacity.setValueAtTime({end} - fadeTime({dur}), bgOpacity);"
        ));
        doc.push(format!("bgLayer.opacity.setValueAtTime({end}, 0);"));
    }
}

impl Default for SentenceScriptGenerator {
    fn default() -> Self {
        Self::new(SentenceLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::domain::segment::Segment;

    fn segment(text: &str, start: f64, end: f64) -> Segment {
        Segment {
            start,
            end,
            text: text.to_string(),
            words: vec![],
        }
    }

    fn count_containing(doc: &ScriptDocument, needle: &str) -> usize {
        doc.commands().iter().filter(|c| c.contains(needle)).count()
    }

    #[test]
    fn test_header_declares_layout_constants() {
        let doc = SentenceScriptGenerator::default().generate(&[]);
        assert!(doc.commands().contains(&"var fadeDuration = 15;".to_string()));
        assert!(doc.commands().contains(&"var fontSize = 80;".to_string()));
        assert!(doc
            .commands()
            .contains(&"var yPos = comp.height * 0.85;".to_string()));
        assert_eq!(count_containing(&doc, "function fadeTime"), 1);
    }

    #[test]
    fn test_one_text_and_background_pair_per_segment() {
        let segments = vec![
            segment("one", 0.0, 1.0),
            segment("two", 1.0, 2.0),
            segment("three", 2.0, 3.0),
        ];
        let doc = SentenceScriptGenerator::default().generate(&segments);
        assert_eq!(count_containing(&doc, "comp.layers.addText("), 3);
        assert_eq!(count_containing(&doc, "comp.layers.addSolid("), 3);
    }

    #[test]
    fn test_segments_emitted_in_input_order() {
        let segments = vec![segment("alpha", 0.0, 1.0), segment("beta", 1.0, 2.0)];
        let doc = SentenceScriptGenerator::default().generate(&segments);
        let alpha = doc
            .commands()
            .iter()
            .position(|c| c.contains("addText(\"alpha\")"))
            .unwrap();
        let beta = doc
            .commands()
            .iter()
            .position(|c| c.contains("addText(\"beta\")"))
            .unwrap();
        assert!(alpha < beta);
    }

    #[test]
    fn test_timing_bounds_span_the_segment() {
        let doc = SentenceScriptGenerator::default().generate(&[segment("hi", 1.0, 3.0)]);
        assert!(doc.commands().contains(&"textLayer.inPoint = 1;".to_string()));
        assert!(doc.commands().contains(&"textLayer.outPoint = 3;".to_string()));
        assert!(doc.commands().contains(&"bgLayer.inPoint = 1;".to_string()));
        assert!(doc.commands().contains(&"bgLayer.outPoint = 3;".to_string()));
    }

    #[test]
    fn test_fade_keyframes_are_clamped_to_element_duration() {
        let doc = SentenceScriptGenerator::default().generate(&[segment("hi", 1.0, 3.0)]);
        // Keyframe offsets route through the clamped fadeTime helper, so the
        // sequence stays monotonic even when the segment is shorter than two
        // fade windows.
        assert!(doc
            .commands()
            .contains(&"textLayer.opacity.setValueAtTime(1 + fadeTime(2), 100);".to_string()));
        assert!(doc
            .commands()
            .contains(&"textLayer.opacity.setValueAtTime(3 - fadeTime(2), 100);".to_string()));
    }

    #[test]
    fn test_double_quotes_in_text_are_escaped() {
        let doc =
            SentenceScriptGenerator::default().generate(&[segment("hello \"world\"", 1.0, 3.0)]);
        assert_eq!(
            count_containing(&doc, "addText(\"hello \\\"world\\\"\")"),
            1
        );
    }

    #[test]
    fn test_empty_input_emits_header_only() {
        let doc = SentenceScriptGenerator::default().generate(&[]);
        assert_eq!(count_containing(&doc, "addText("), 0);
        assert_eq!(count_containing(&doc, "addSolid("), 0);
        assert!(!doc.is_empty());
    }
}
