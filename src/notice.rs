// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transient user-facing notifications (the console's toasts).

use std::fmt;

use crate::error::{ApiError, GENERIC_FAILURE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notice {
    pub fn success(description: impl Into<String>) -> Self {
        Notice {
            title: "Sucesso".to_string(),
            description: description.into(),
            variant: Variant::Success,
        }
    }

    pub fn failure(description: impl Into<String>) -> Self {
        Notice {
            title: "Erro".to_string(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }

    /// Converts any error into a destructive notice, preferring the server's
    /// own message.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let description = match err.downcast_ref::<ApiError>() {
            Some(api) => api.user_message(),
            None => {
                let text = format!("{:#}", err);
                if text.is_empty() {
                    GENERIC_FAILURE.to_string()
                } else {
                    text
                }
            }
        };
        Notice::failure(description)
    }

    /// Notices go to stderr so list output on stdout stays machine-readable.
    pub fn emit(&self) {
        match self.variant {
            Variant::Success => tracing::info!("{}", self.description),
            Variant::Destructive => tracing::error!("{}", self.description),
        }
        eprintln!("{}", self);
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = match self.variant {
            Variant::Success => "✔",
            Variant::Destructive => "✖",
        };
        write!(f, "{} {}: {}", mark, self.title, self.description)
    }
}
