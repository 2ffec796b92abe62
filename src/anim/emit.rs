//! Script writer.
//!
//! Writes the Anima sequence source: a file header, one namespace, and one
//! class per exported object whose `PData()` body lists the kept frames.

use std::io::Write;

use crate::anim::{compress, CompressedRange, RecordLayout, Sequence};
use crate::core::ExportConfig;
use crate::util::{Error, FloatLiteral, Result};

/// First line of every generated file.
pub const FILE_HEADER: &str = "using AnimaScript;";

/// Base class every generated sequence derives from.
pub const BASE_CLASS: &str = "AnimaSeqBase";

/// Open the file: header line and namespace block.
pub fn write_file_header<W: Write + ?Sized>(out: &mut W, namespace: &str) -> Result<()> {
    writeln!(out, "{}", FILE_HEADER)?;
    write!(out, "\nnamespace {}\n{{\n", namespace)?;
    Ok(())
}

/// Close the namespace block.
pub fn write_file_footer<W: Write + ?Sized>(out: &mut W) -> Result<()> {
    writeln!(out, "}}")?;
    Ok(())
}

/// Values written into the `PInit(...)` call, offset already applied.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceHeader {
    pub class_name: String,
    pub start: i32,
    pub end: i32,
    pub frame_rate: f64,
    pub keep_start: i32,
    pub keep_end: i32,
}

impl SequenceHeader {
    pub fn new(class_name: String, config: &ExportConfig, kept: CompressedRange) -> Self {
        let full = config.range().offset(config.frame_offset);
        let kept = kept.offset(config.frame_offset);
        Self {
            class_name,
            start: full.start,
            end: full.end,
            frame_rate: config.frame_rate,
            keep_start: kept.keep_start,
            keep_end: kept.keep_end,
        }
    }

    /// The `PInit(...)` call, without the trailing `;`.
    pub fn init_call(&self) -> String {
        format!(
            "PInit(\"{}\",{},{},{},{},{})",
            self.class_name,
            self.start,
            self.end,
            FloatLiteral(self.frame_rate),
            self.keep_start,
            self.keep_end
        )
    }
}

/// Write one sequence class. `instructions` are the kept records in order.
pub fn write_sequence_class<W, S>(out: &mut W, header: &SequenceHeader, instructions: &[S]) -> Result<()>
where
    W: Write + ?Sized,
    S: AsRef<str>,
{
    let name = &header.class_name;
    writeln!(out, "    public class {} : {}", name, BASE_CLASS)?;
    writeln!(out, "    {{")?;
    writeln!(out, "        private static {} m_seq = null;", BASE_CLASS)?;
    writeln!(out, "        new public static {} Adquire()", BASE_CLASS)?;
    writeln!(out, "        {{")?;
    writeln!(out, "            if (m_seq == null) m_seq = PManAdd(new {}());", name)?;
    writeln!(out, "            return m_seq;")?;
    writeln!(out, "        }}")?;
    writeln!(out, "        public override void DiscardStatic() {{ m_seq = PManRem(m_seq); }}")?;
    writeln!(out, "        new public static void Discard() {{ m_seq = PManRem(m_seq); }}")?;
    writeln!(out, "        protected override void PData()")?;
    writeln!(out, "        {{")?;
    writeln!(out, "            {};", header.init_call())?;
    for instruction in instructions {
        writeln!(out, "            {};", instruction.as_ref())?;
    }
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    Ok(())
}

/// Outcome of emitting one object.
#[derive(Clone, Debug, PartialEq)]
pub struct EmittedSequence {
    pub class_name: String,
    /// Kept range in sampled (not offset) frame numbers.
    pub kept: CompressedRange,
    pub instructions: usize,
}

/// Compress a sampled sequence and write its class.
///
/// Frames are compared by their rendered record text, so samples that
/// differ only in channels that are not written count as identical. With
/// every channel disabled each kept frame still gets a `PNone()` line.
///
/// The sequence must cover exactly `config.range()`, otherwise the header
/// could name a kept range outside its own start and end.
pub fn emit_sequence<W: Write + ?Sized>(
    out: &mut W,
    sequence: &Sequence,
    config: &ExportConfig,
    label: &str,
) -> Result<EmittedSequence> {
    let (expected, actual) = (config.range(), sequence.range());
    if expected != actual {
        return Err(Error::RangeMismatch {
            expected_start: expected.start,
            expected_end: expected.end,
            actual_start: actual.start,
            actual_end: actual.end,
        });
    }

    let layout = RecordLayout::from_channels(config.channels);
    let records = layout.render_sequence(sequence);
    let kept = compress(sequence.range(), &records)?;

    let first = (kept.keep_start - sequence.range().start) as usize;
    let last = (kept.keep_end - sequence.range().start) as usize;
    let instructions = &records[first..=last];

    let class_name = config.class_name_for(label);
    let header = SequenceHeader::new(class_name.clone(), config, kept);
    write_sequence_class(out, &header, instructions)?;

    tracing::debug!(
        "{}: kept {}..{} of {}..{} ({} instructions, {:?})",
        class_name, kept.keep_start, kept.keep_end,
        sequence.range().start, sequence.range().end,
        instructions.len(), layout,
    );

    Ok(EmittedSequence {
        class_name,
        kept,
        instructions: instructions.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::TransformSample;
    use crate::core::{Channels, FrameRange};
    use crate::util::DVec3;

    fn moving(range: FrameRange) -> Sequence {
        let samples = range
            .frames()
            .map(|f| TransformSample {
                position: DVec3::new(f as f64, 0.0, 0.0),
                ..TransformSample::IDENTITY
            })
            .collect();
        Sequence::new(range, samples).unwrap()
    }

    fn emit(sequence: &Sequence, config: &ExportConfig, label: &str) -> (String, EmittedSequence) {
        let mut buf = Vec::new();
        let info = emit_sequence(&mut buf, sequence, config, label).unwrap();
        (String::from_utf8(buf).unwrap(), info)
    }

    #[test]
    fn test_file_frame() {
        let mut buf = Vec::new();
        write_file_header(&mut buf, "AnimaData").unwrap();
        write_file_footer(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "using AnimaScript;\n\nnamespace AnimaData\n{\n}\n"
        );
    }

    #[test]
    fn test_class_block() {
        let header = SequenceHeader {
            class_name: "Seq_Cube".into(),
            start: 0,
            end: 2,
            frame_rate: 24.0,
            keep_start: 0,
            keep_end: 1,
        };
        let mut buf = Vec::new();
        write_sequence_class(&mut buf, &header, &["PLocation(0f,0f,0f)", "PLocation(1f,0f,0f)"]).unwrap();
        let expected = [
            "    public class Seq_Cube : AnimaSeqBase",
            "    {",
            "        private static AnimaSeqBase m_seq = null;",
            "        new public static AnimaSeqBase Adquire()",
            "        {",
            "            if (m_seq == null) m_seq = PManAdd(new Seq_Cube());",
            "            return m_seq;",
            "        }",
            "        public override void DiscardStatic() { m_seq = PManRem(m_seq); }",
            "        new public static void Discard() { m_seq = PManRem(m_seq); }",
            "        protected override void PData()",
            "        {",
            "            PInit(\"Seq_Cube\",0,2,24f,0,1);",
            "            PLocation(0f,0f,0f);",
            "            PLocation(1f,0f,0f);",
            "        }",
            "    }",
            "",
        ]
        .join("\n");
        assert_eq!(String::from_utf8(buf).unwrap(), expected);
    }

    #[test]
    fn test_static_object() {
        let range = FrameRange::new(0, 9);
        let seq = Sequence::constant(range, TransformSample::IDENTITY);
        let config = ExportConfig { frame_start: 0, frame_end: 9, ..Default::default() };
        let (text, info) = emit(&seq, &config, "Box");

        assert!(text.contains("PInit(\"Seq_Box\",0,9,60f,0,0);"));
        assert_eq!(text.matches("PLocRotScale(").count(), 1);
        assert_eq!(info.kept, CompressedRange { keep_start: 0, keep_end: 0 });
        assert_eq!(info.instructions, 1);
    }

    #[test]
    fn test_offset_shifts_header_only() {
        let range = FrameRange::new(0, 9);
        let seq = moving(range);
        let plain = ExportConfig { frame_start: 0, frame_end: 9, ..Default::default() };
        let shifted = ExportConfig { frame_offset: -5, ..plain.clone() };

        let (a, ia) = emit(&seq, &plain, "Arm");
        let (b, ib) = emit(&seq, &shifted, "Arm");
        assert!(a.contains("PInit(\"Seq_Arm\",0,9,60f,0,9);"));
        assert!(b.contains("PInit(\"Seq_Arm\",-5,4,60f,-5,4);"));
        assert_eq!(ia.instructions, ib.instructions);
        assert_eq!(a.lines().count(), b.lines().count());
    }

    #[test]
    fn test_unnormalized_offset_does_not_overflow() {
        let seq = moving(FrameRange::new(0, 9));
        let config = ExportConfig { frame_end: 9, frame_offset: i32::MAX, ..Default::default() };
        let (text, _) = emit(&seq, &config, "Arm");
        assert!(text.contains("PInit(\"Seq_Arm\",2147483647,2147483647,60f,2147483647,2147483647);"));
    }

    #[test]
    fn test_no_channels_one_line_per_kept_frame() {
        let range = FrameRange::new(0, 4);
        let seq = moving(range);
        let config = ExportConfig {
            frame_end: 4,
            channels: Channels::NONE,
            ..Default::default()
        };
        // All records read PNone(), so the sequence is static
        let (text, info) = emit(&seq, &config, "X");
        assert_eq!(info.instructions, 1);
        assert_eq!(text.matches("PNone();").count(), 1);
    }

    #[test]
    fn test_position_only_conversion_output() {
        let range = FrameRange::single(0);
        let seq = Sequence::constant(
            range,
            TransformSample::from_host_matrix(&crate::util::DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0)))
                .unwrap(),
        );
        let config = ExportConfig {
            channels: Channels::new(true, false, false),
            ..Default::default()
        };
        let (text, _) = emit(&seq, &config, "P");
        assert!(text.contains("            PLocation(-1f,3f,2f);\n"));
    }

    #[test]
    fn test_range_must_match_config() {
        let seq = moving(FrameRange::new(0, 9));
        let mut buf = Vec::new();
        let err = emit_sequence(&mut buf, &seq, &ExportConfig::default(), "A").unwrap_err();
        assert!(matches!(
            err,
            Error::RangeMismatch { expected_start: 0, expected_end: 0, actual_start: 0, actual_end: 9 }
        ));
        assert!(err.is_contract_violation());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_textual_equality_merges_frames() {
        // Positions differ, but only rotation is written
        let range = FrameRange::new(0, 2);
        let a = TransformSample { position: DVec3::new(0.000001, 0.0, 0.0), ..TransformSample::IDENTITY };
        let b = TransformSample { position: DVec3::new(0.0, 0.0, 0.0), ..TransformSample::IDENTITY };
        let seq = Sequence::new(range, vec![a, b, b]).unwrap();
        let config = ExportConfig { frame_end: 2, channels: Channels::new(false, true, false), ..Default::default() };
        let (_, info) = emit(&seq, &config, "R");
        assert!(info.kept.is_single());
    }
}
