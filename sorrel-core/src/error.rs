// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::fmt;

#[derive(Debug, Clone)]
pub enum SorrelError {
    BackgroundColorError,
    MaskEncodeError,
    GeometryError(&'static str),
    AnnotationReadError(String),
    AnnotationWriteError(String),
    TaskReadError(String),
    TaskWriteError(String),
    DirError(String),
    OtherError(String),
}

impl fmt::Display for SorrelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SorrelError::BackgroundColorError => {
                write!(
                    f,
                    "[sorrel::BackgroundColorError] The background color cannot be registered as a category."
                )
            }
            SorrelError::MaskEncodeError => {
                write!(
                    f,
                    "[sorrel::MaskEncodeError] Failed to encode id mask as an embeddable image."
                )
            }
            SorrelError::GeometryError(message) => {
                write!(f, "[sorrel::GeometryError] Invalid geometry. {}", message)
            }
            SorrelError::AnnotationReadError(message) => {
                write!(
                    f,
                    "[sorrel::AnnotationReadError] Annotation file could not be read. {}.",
                    message
                )
            }
            SorrelError::AnnotationWriteError(message) => {
                write!(
                    f,
                    "[sorrel::AnnotationWriteError] Failed to write annotation file. {}.",
                    message
                )
            }
            SorrelError::TaskReadError(message) => {
                write!(
                    f,
                    "[sorrel::TaskReadError] Task descriptor could not be read. {}.",
                    message
                )
            }
            SorrelError::TaskWriteError(message) => {
                write!(
                    f,
                    "[sorrel::TaskWriteError] Failed to write task descriptor. {}.",
                    message
                )
            }
            SorrelError::DirError(message) => {
                write!(
                    f,
                    "[sorrel::DirError] Directory could not be read. {}.",
                    message
                )
            }
            SorrelError::OtherError(message) => {
                write!(f, "[sorrel::OtherError] Error: {}.", message)
            }
        }
    }
}

impl std::error::Error for SorrelError {}
