//! Media capture constraints.
//!
//! Two shapes exist: the direct shape handed to a host that captures
//! windows natively, and the extension-mediated desktop shape that embeds
//! the source ID chosen through the helper extension.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::host::Screen;

// ============================================================================
// Constants
// ============================================================================

/// Frame rate cap for extension-mediated capture.
pub const MAX_FRAME_RATE: u32 = 15;

/// Direct capture source used when the caller supplies nothing.
pub const DEFAULT_MEDIA_SOURCE: &str = "window";

/// Media source value for extension-mediated desktop capture.
pub const DESKTOP_MEDIA_SOURCE: &str = "desktop";

// ============================================================================
// MediaConstraints
// ============================================================================

/// Constraints passed to the native capture call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConstraints {
    /// Capture audio as well.
    pub audio: bool,

    /// Video source descriptor.
    pub video: VideoConstraints,
}

/// Video half of [`MediaConstraints`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VideoConstraints {
    /// Extension-mediated desktop capture.
    Desktop {
        /// Mandatory desktop capture parameters.
        mandatory: DesktopCapture,
    },
    /// Direct capture of a source kind.
    Source {
        /// Source kind, e.g. `window` or `screen`.
        #[serde(rename = "mediaSource")]
        source: String,
    },
}

/// Mandatory parameters of an extension-mediated capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopCapture {
    /// Always [`DESKTOP_MEDIA_SOURCE`].
    pub chrome_media_source: String,
    /// Width bound, the screen's reported width.
    pub max_width: u32,
    /// Height bound, the screen's reported height.
    pub max_height: u32,
    /// Frame rate bound.
    pub max_frame_rate: u32,
    /// Source ID chosen through the extension.
    pub chrome_media_source_id: String,
}

// ============================================================================
// Constructors
// ============================================================================

impl MediaConstraints {
    /// Default direct constraints: window capture, no audio.
    #[inline]
    #[must_use]
    pub fn direct() -> Self {
        Self::direct_source(DEFAULT_MEDIA_SOURCE)
    }

    /// Direct constraints for a specific source kind, no audio.
    #[inline]
    #[must_use]
    pub fn direct_source(source: impl Into<String>) -> Self {
        Self {
            audio: false,
            video: VideoConstraints::Source {
                source: source.into(),
            },
        }
    }

    /// Default extension-mediated constraints for a source, no audio.
    #[must_use]
    pub fn desktop(source_id: impl Into<String>, screen: Screen) -> Self {
        Self {
            audio: false,
            video: VideoConstraints::Desktop {
                mandatory: DesktopCapture {
                    chrome_media_source: DESKTOP_MEDIA_SOURCE.to_string(),
                    max_width: screen.width,
                    max_height: screen.height,
                    max_frame_rate: MAX_FRAME_RATE,
                    chrome_media_source_id: source_id.into(),
                },
            },
        }
    }

    /// Enables or disables audio capture.
    #[inline]
    #[must_use]
    pub fn with_audio(mut self, audio: bool) -> Self {
        self.audio = audio;
        self
    }

    /// Binds a desktop-shaped override to the given source.
    ///
    /// Direct-shaped constraints are returned unchanged.
    #[must_use]
    pub fn bind_source(mut self, source_id: &str) -> Self {
        if let VideoConstraints::Desktop { mandatory } = &mut self.video {
            mandatory.chrome_media_source_id = source_id.to_string();
        }
        self
    }

    /// Returns the bound desktop source ID, if any.
    #[inline]
    #[must_use]
    pub fn source_id(&self) -> Option<&str> {
        match &self.video {
            VideoConstraints::Desktop { mandatory } => Some(&mandatory.chrome_media_source_id),
            VideoConstraints::Source { .. } => None,
        }
    }
}

// ============================================================================
// CaptureConstraints
// ============================================================================

/// Caller overrides for either capture path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureConstraints {
    /// Used when the host captures natively.
    pub native_path: Option<MediaConstraints>,
    /// Used when capture goes through the extension.
    pub extension_path: Option<MediaConstraints>,
}

impl CaptureConstraints {
    /// Creates empty overrides.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the native path override.
    #[inline]
    #[must_use]
    pub fn with_native_path(mut self, constraints: MediaConstraints) -> Self {
        self.native_path = Some(constraints);
        self
    }

    /// Sets the extension path override.
    #[inline]
    #[must_use]
    pub fn with_extension_path(mut self, constraints: MediaConstraints) -> Self {
        self.extension_path = Some(constraints);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
