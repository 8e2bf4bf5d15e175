//! Image-label candidates produced by the external labeler

use serde::Deserialize;
use utoipa::ToSchema;

/// One food-name hypothesis from the image labeler
///
/// The labeler reports a confidence in `[0, 1]` per label; the service never
/// re-scores labels, it only orders them.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LabelCandidate {
    pub text: String,
    pub confidence: f32,
}
