use crate::media::Bitmap;

/// Styling hint for a text block, resolved to concrete colors by the
/// presentation side's active palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Body,
}

/// One unit of output destined for the presentation surface. Events are
/// consumed exactly once, in emission order per producing task; no ordering
/// is guaranteed across tasks.
#[derive(Debug, Clone)]
pub enum RenderEvent {
    TextBlock { text: String, style: TextStyle },
    Image(Bitmap),
    ErrorNotice(String),
}
