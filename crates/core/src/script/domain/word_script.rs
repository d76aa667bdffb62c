use crate::transcript::domain::segment::Segment;

use super::layout::WordLayout;
use super::script_document::{color_literal, quote, ScriptDocument};

/// Generates the word-by-word caption script: per segment with word
/// timings, one background solid spanning the whole row and one text
/// element per word, evenly spaced around the horizontal center. Rows
/// stack downward; segments without word timings emit nothing.
pub struct WordScriptGenerator {
    layout: WordLayout,
}

impl WordScriptGenerator {
    pub fn new(layout: WordLayout) -> Self {
        Self { layout }
    }

    pub fn generate(&self, segments: &[Segment]) -> ScriptDocument {
        let mut doc = ScriptDocument::new();
        self.emit_header(&mut doc);

        // Vertical offset is an explicit accumulator: each emitted row
        // advances it, skipped segments leave it untouched.
        let mut y = self.layout.y_start;
        for (idx, seg) in segments.iter().enumerate() {
            y = self.emit_segment(&mut doc, idx, seg, y);
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
        doc.push(format!("var textColor = {};", color_literal(l.text_color)));
        doc.push(format!("var bgColor = {};", color_literal(l.bg_color)));
        doc.push("var compWidth = comp.width;");
        doc.push("var compHeight = comp.height;");
        doc.push("function fadeTime(duration) { return Math.min(fadeDuration / comp.frameRate, duration / 2); }");
    }

    /// Emits one caption row and returns the vertical offset for the next
    /// row.
    fn emit_segment(&self, doc: &mut ScriptDocument, idx: usize, seg: &Segment, y: f64) -> f64 {
        if !seg.has_words() {
            return y;
        }
        let l = &self.layout;
        let words = &seg.words;

        let total_chars: usize = words.iter().map(|w| w.word.chars().count()).sum();
        let bg_width = l.px_per_char as usize * total_chars + l.bg_padding_px as usize;
        let row_start = words[0].start_time;
        let row_end = words[words.len() - 1].end_time;
        let row_dur = row_end - row_start;

        doc.push(format!("// Sentence {} background", idx + 1));
        doc.push(format!(
            "var bgLayer = comp.layers.addSolid(bgColor, \"BG_{}\", Math.min(compWidth, {bg_width}), {}, 1);",
            idx + 1,
            l.bg_height()
        ));
        doc.push(format!(
            "bgLayer.property(\"Transform\").property(\"Position\").setValue([compWidth/2, {y}]);"
        ));
        doc.push("bgLayer.property(\"Transform\").property(\"Opacity\").setValue(bgOpacity);");
        doc.push(format!("bgLayer.inPoint = {row_start};"));
        doc.push(format!("bgLayer.outPoint = {row_end};"));
        doc.push(format!("bgLayer.opacity.setValueAtTime({row_start}, 0);"));
        doc.push(format!(
            "bgLayer.opacity.setValueAtTime({row_start} + fadeTime({row_dur}), bgOpacity);"
        ));
        doc.push(format!(
            "bgLayer.opacity.setValueAtTime({row_end} - fadeTime({row_dur}), bgOpacity);"
        ));
        doc.push(format!("bgLayer.opacity.setValueAtTime({row_end}, 0);"));

        // Words sit at fixed offsets from center so the row reads
        // left-to-right with even spacing.
        let total_width = (words.len() as i64 - 1) * l.word_spacing as i64;
        for (j, word) in words.iter().enumerate() {
            let text = quote(&word.word);
            let w_start = word.start_time;
            let w_end = word.end_time;
            let w_dur = word.duration();
            let offset = j as i64 * l.word_spacing as i64 - total_width / 2;
            let x = if offset < 0 {
                format!("compWidth/2 - {}", -offset)
            } else {
                format!("compWidth/2 + {offset}")
            };

            doc.push(format!("// Word {} of sentence {}", j + 1, idx + 1));
            doc.push(format!("var textLayer = comp.layers.addText({text});"));
            doc.push(format!(
                "textLayer.property(\"Position\").setValue([{x}, {y}]);"
            ));
            doc.push("var textProp = textLayer.property(\"Source Text\");");
            doc.push("var textDocument = textProp.value;");
            doc.push("textDocument.fontSize = fontSize;");
            doc.push("textDocument.fillColor = textColor;");
            doc.push("textDocument.justification = ParagraphJustification.CENTER_JUSTIFY;");
            doc.push("textProp.setValue(textDocument);");
            doc.push(format!("textLayer.inPoint = {w_start};"));
            doc.push(format!("textLayer.outPoint = {w_end};"));
            doc.push(format!("textLayer.opacity.setValueAtTime({w_start}, 0);"));
            doc.push(format!(
                "textLayer.opacity.setValueAtTime({w_start} + fadeTime({w_dur}), 100);"
            ));
            doc.push(format!(
                "textLayer.opacity.setValueAtTime({w_end} - fadeTime({w_dur}), 100);"
            ));
            doc.push(format!("textLayer.opacity.setValueAtTime({w_end}, 0);"));
            doc.push("textLayer.moveBefore(bgLayer);");
        }

        y + l.y_step()
    }
}

impl Default for WordScriptGenerator {
    fn default() -> Self {
        Self::new(WordLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::domain::segment::{Segment, TranscriptWord};

    fn word(text: &str, start: f64, end: f64) -> TranscriptWord {
        TranscriptWord {
            word: text.to_string(),
            start_time: start,
            end_time: end,
            confidence: 0.9,
        }
    }

    fn segment_with_words(words: Vec<TranscriptWord>) -> Segment {
        let text = words
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let (start, end) = match (words.first(), words.last()) {
            (Some(f), Some(l)) => (f.start_time, l.end_time),
            _ => (0.0, 0.0),
        };
        Segment {
            start,
            end,
            text,
            words,
        }
    }

    fn empty_segment(text: &str, start: f64, end: f64) -> Segment {
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
    fn test_k_words_emit_k_text_elements_and_one_background() {
        let seg = segment_with_words(vec![
            word("one", 0.0, 0.5),
            word("two", 0.5, 1.0),
            word("three", 1.0, 1.5),
        ]);
        let doc = WordScriptGenerator::default().generate(&[seg]);
        assert_eq!(count_containing(&doc, "comp.layers.addText("), 3);
        assert_eq!(count_containing(&doc, "comp.layers.addSolid("), 1);
    }

    #[test]
    fn test_segment_without_words_emits_nothing() {
        let header_len = WordScriptGenerator::default().generate(&[]).len();
        let doc = WordScriptGenerator::default().generate(&[empty_segment("quiet", 0.0, 2.0)]);
        assert_eq!(doc.len(), header_len);
    }

    #[test]
    fn test_background_spans_first_to_last_word() {
        let seg = segment_with_words(vec![word("hello", 1.0, 1.8), word("world", 1.9, 3.0)]);
        let doc = WordScriptGenerator::default().generate(&[seg]);
        assert!(doc.commands().contains(&"bgLayer.inPoint = 1;".to_string()));
        assert!(doc.commands().contains(&"bgLayer.outPoint = 3;".to_string()));
    }

    #[test]
    fn test_words_carry_their_own_timing() {
        let seg = segment_with_words(vec![word("hello", 1.0, 1.8), word("world", 1.9, 3.0)]);
        let doc = WordScriptGenerator::default().generate(&[seg]);
        assert!(doc.commands().contains(&"textLayer.inPoint = 1;".to_string()));
        assert!(doc.commands().contains(&"textLayer.outPoint = 1.8;".to_string()));
        assert!(doc.commands().contains(&"textLayer.inPoint = 1.9;".to_string()));
        assert!(doc.commands().contains(&"textLayer.outPoint = 3;".to_string()));
    }

    #[test]
    fn test_words_are_spaced_evenly_around_center() {
        let seg = segment_with_words(vec![word("hello", 1.0, 1.8), word("world", 1.9, 3.0)]);
        let doc = WordScriptGenerator::default().generate(&[seg]);
        assert_eq!(count_containing(&doc, "setValue([compWidth/2 - 30, 200]);"), 1);
        assert_eq!(count_containing(&doc, "setValue([compWidth/2 + 30, 200]);"), 1);
    }

    #[test]
    fn test_background_width_follows_character_heuristic() {
        // 10 characters total at 60 px each plus 100 px padding, capped at
        // the composition width
        let seg = segment_with_words(vec![word("hello", 1.0, 1.8), word("world", 1.9, 3.0)]);
        let doc = WordScriptGenerator::default().generate(&[seg]);
        assert_eq!(count_containing(&doc, "Math.min(compWidth, 700)"), 1);
    }

    #[test]
    fn test_rows_stack_downward_per_emitted_segment() {
        let first = segment_with_words(vec![word("a", 0.0, 0.5)]);
        let second = segment_with_words(vec![word("b", 1.0, 1.5)]);
        let doc = WordScriptGenerator::default().generate(&[first, second]);
        assert_eq!(count_containing(&doc, ", 200]);"), 2);
        assert_eq!(count_containing(&doc, ", 320]);"), 2);
    }

    #[test]
    fn test_skipped_segment_does_not_advance_the_row_offset() {
        let silent = empty_segment("quiet", 0.0, 1.0);
        let spoken = segment_with_words(vec![word("a", 1.0, 1.5)]);
        let doc = WordScriptGenerator::default().generate(&[silent, spoken]);
        assert_eq!(count_containing(&doc, ", 200]);"), 2);
        assert_eq!(count_containing(&doc, ", 320]);"), 0);
    }

    #[test]
    fn test_quoted_word_text_is_escaped() {
        let seg = segment_with_words(vec![word("\"world\"", 1.9, 3.0)]);
        let doc = WordScriptGenerator::default().generate(&[seg]);
        assert_eq!(count_containing(&doc, "addText(\"\\\"world\\\"\")"), 1);
    }

    #[test]
    fn test_fade_keyframes_use_clamped_helper() {
        let seg = segment_with_words(vec![word("hello", 1.0, 1.8)]);
        let doc = WordScriptGenerator::default().generate(&[seg]);
        assert!(doc.commands().contains(
            &"textLayer.opacity.setValueAtTime(1 + fadeTime(0.8), 100);".to_string()
        ));
        assert!(doc.commands().contains(
            &"textLayer.opacity.setValueAtTime(1.8 - fadeTime(0.8), 100);".to_string()
        ));
    }
}
