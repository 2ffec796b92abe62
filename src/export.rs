//! Multi-object export driver.
//!
//! Samples every selected object, emits one class per object inside a single
//! namespace, and writes the finished document in one go. The document is
//! rendered in memory first: if any object fails, nothing reaches the sink.

use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, info, info_span};

use crate::anim::{emit_sequence, sample_scoped, write_file_footer, write_file_header, EmittedSequence};
use crate::core::{ExportConfig, FrameCursor, SceneNode, TransformProvider};
use crate::util::{Error, Result};

/// Export statistics
#[derive(Default, Debug, Clone)]
pub struct ExportStats {
    /// Objects written.
    pub objects: usize,
    /// Frames sampled across all objects.
    pub frames_sampled: usize,
    /// Instruction lines written across all objects.
    pub instructions: usize,
    pub elapsed: Duration,
    pub sequences: Vec<EmittedSequence>,
}

impl ExportStats {
    /// Frames dropped by trimming.
    pub fn frames_trimmed(&self) -> usize {
        self.frames_sampled - self.instructions
    }
}

/// Keep only exportable objects; an empty result is [`Error::NoSelection`].
pub fn select_exportable<'a, O>(candidates: impl IntoIterator<Item = &'a O>) -> Result<Vec<&'a O>>
where
    O: SceneNode + ?Sized + 'a,
{
    let selected: Vec<&O> = candidates
        .into_iter()
        .filter(|o| {
            let ok = o.is_exportable();
            if !ok {
                debug!("skipping '{}': not exportable", o.name());
            }
            ok
        })
        .collect();
    if selected.is_empty() {
        return Err(Error::NoSelection);
    }
    Ok(selected)
}

/// Export `objects` as one Anima script into `out`.
///
/// Non-exportable objects are skipped. The config is normalized first, so
/// out-of-range settings are clamped rather than rejected. The host frame
/// cursor is restored after each object.
pub fn export_sequences<H, O, W>(
    host: &mut H,
    objects: &[&O],
    config: &ExportConfig,
    out: &mut W,
) -> Result<ExportStats>
where
    H: TransformProvider<O> + FrameCursor + ?Sized,
    O: SceneNode + ?Sized,
    W: Write + ?Sized,
{
    let time_start = Instant::now();
    let objects = select_exportable(objects.iter().copied())?;
    let config = config.normalized();

    info!(
        "Animation from {} to {} @ {:.2} fps",
        config.frame_start, config.frame_end, config.frame_rate
    );

    let mut buf = Vec::new();
    let mut stats = ExportStats::default();
    write_file_header(&mut buf, &config.namespace)?;

    for object in objects {
        let _span = info_span!("export_object", name = object.name()).entered();
        let sequence = sample_scoped(host, object, config.range())?;
        let emitted = emit_sequence(&mut buf, &sequence, &config, object.name())?;

        stats.objects += 1;
        stats.frames_sampled += sequence.len();
        stats.instructions += emitted.instructions;
        stats.sequences.push(emitted);
    }

    write_file_footer(&mut buf)?;
    out.write_all(&buf)?;
    out.flush()?;

    stats.elapsed = time_start.elapsed();
    info!("Exported objects: {}", stats.objects);
    info!("Export time: {:.4} sec", stats.elapsed.as_secs_f64());
    Ok(stats)
}

/// Like [`export_sequences`], writing to a file. On failure no file is
/// created or touched.
pub fn export_to_path<H, O>(
    host: &mut H,
    objects: &[&O],
    config: &ExportConfig,
    path: impl AsRef<Path>,
) -> Result<ExportStats>
where
    H: TransformProvider<O> + FrameCursor + ?Sized,
    O: SceneNode + ?Sized,
{
    let path = path.as_ref();
    let mut buf = Vec::new();
    let stats = export_sequences(host, objects, config, &mut buf)?;
    info!("Writing {}", path.display());
    std::fs::write(path, &buf)?;
    Ok(stats)
}
