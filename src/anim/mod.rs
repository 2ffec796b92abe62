//! Sequence sampling, compression and script emission.
//!
//! The pipeline for one object is linear:
//!
//! 1. [`sample`] / [`sample_scoped`] build a [`Sequence`] from the host
//! 2. [`RecordLayout`] renders each frame as an instruction record
//! 3. [`compress`] trims identical leading and trailing frames
//! 4. [`emit_sequence`] writes the class block for the kept frames

mod compress;
mod emit;
mod record;
mod sample;

pub use compress::{compress, CompressedRange};
pub use emit::{
    emit_sequence, write_file_footer, write_file_header, write_sequence_class, EmittedSequence,
    SequenceHeader, BASE_CLASS, FILE_HEADER,
};
pub use record::RecordLayout;
pub use sample::{sample, sample_scoped, Sequence, TransformSample};
