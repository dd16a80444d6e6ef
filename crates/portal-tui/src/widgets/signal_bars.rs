//! Signal strength bars (▂▃▄▆█) colored per tier, and the lock glyph.

use ratatui::style::Style;
use ratatui::text::Span;

use portal_core::{SecurityIcon, SignalTier};

use crate::theme;

const BAR_GLYPHS: [char; 5] = ['▂', '▃', '▄', '▆', '█'];

/// Returns a styled `Span` with one bar per tier step, padded to five cells.
///
/// | Tier      | Bars    | Color           |
/// |-----------|---------|-----------------|
/// | excellent | `▂▃▄▆█` | Success Green   |
/// | very good | `▂▃▄▆ ` | Neon Cyan       |
/// | good      | `▂▃▄  ` | Electric Yellow |
/// | fair      | `▂▃   ` | Coral           |
/// | weak      | `▂    ` | Error Red       |
pub fn signal_span(tier: SignalTier) -> Span<'static> {
    let color = match tier {
        SignalTier::Excellent => theme::SUCCESS_GREEN,
        SignalTier::VeryGood => theme::NEON_CYAN,
        SignalTier::Good => theme::ELECTRIC_YELLOW,
        SignalTier::Fair => theme::CORAL,
        SignalTier::Weak => theme::ERROR_RED,
    };

    let lit = tier.bars().min(BAR_GLYPHS.len());
    let bars: String = BAR_GLYPHS
        .iter()
        .enumerate()
        .map(|(i, &glyph)| if i < lit { glyph } else { ' ' })
        .collect();

    Span::styled(bars, Style::default().fg(color))
}

pub fn security_span(icon: SecurityIcon) -> Span<'static> {
    match icon {
        SecurityIcon::Locked => Span::styled("🔒", Style::default().fg(theme::ELECTRIC_YELLOW)),
        SecurityIcon::Unlocked => Span::styled("🔓", Style::default().fg(theme::BORDER_GRAY)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_grow_with_tier() {
        assert_eq!(signal_span(SignalTier::Weak).content, "▂    ");
        assert_eq!(signal_span(SignalTier::Good).content, "▂▃▄  ");
        assert_eq!(signal_span(SignalTier::Excellent).content, "▂▃▄▆█");
    }

    #[test]
    fn tiers_have_distinct_colors() {
        assert_ne!(
            signal_span(SignalTier::Weak).style,
            signal_span(SignalTier::Excellent).style
        );
    }
}
