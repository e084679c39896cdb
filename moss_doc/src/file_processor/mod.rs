//! File processor: loads pages under the configured limits and writes results

mod processor;

pub use processor::{
    process_file, write_file, FileMetadata, FileProcessorError, LoadedFile,
};
