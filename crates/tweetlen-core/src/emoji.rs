//! Emoji classification for grapheme clusters.

use unic_emoji_char::{is_emoji, is_emoji_presentation};

/// Decides whether a grapheme cluster is weighed as a single emoji.
pub trait EmojiClassifying: Send + Sync {
    /// Returns `true` if `cluster` should cost the flat emoji weight.
    fn is_emoji(&self, cluster: &str) -> bool;
}

/// Classifier backed by the Unicode emoji property tables.
///
/// A cluster counts as emoji when its first scalar has default emoji
/// presentation (😀), or when it spans several scalars and the first one
/// carries the `Emoji` property. The second rule picks up flags, skin-tone
/// sequences, ZWJ sequences and keycaps while leaving a lone `#` or `5`
/// alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiClassifier;

impl EmojiClassifying for EmojiClassifier {
    fn is_emoji(&self, cluster: &str) -> bool {
        let mut scalars = cluster.chars();
        let Some(first) = scalars.next() else {
            return false;
        };
        if is_emoji_presentation(first) {
            return true;
        }
        scalars.next().is_some() && is_emoji(first)
    }
}
