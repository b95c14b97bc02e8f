//! Share card rendering
//!
//! Produces a fixed-size 1200x630 SVG for social previews. Output depends only
//! on the user id and the optional personality tag; nothing is read from or
//! written to the store.

use quiz_common::PersonalityType;

pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 630;

const FALLBACK_TITLE: &str = "Web3 Builder";
const FALLBACK_TAGLINE: &str = "Took the Web3 Personality Quiz!";
const FALLBACK_GRADIENT: (&str, &str) = ("#8b5cf6", "#3b82f6");

/// Text and colors placed on a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardContent {
    pub badge: String,
    pub title: String,
    pub tagline: String,
    pub gradient: (&'static str, &'static str),
}

impl CardContent {
    /// Card content for a raw personality tag
    ///
    /// Known tags get their own title and colors. Anything else gets the
    /// generic card, badged with the tag's first letter when there is one.
    pub fn for_tag(tag: Option<&str>) -> Self {
        if let Some(t) = tag.and_then(|t| t.parse::<PersonalityType>().ok()) {
            return CardContent {
                badge: t.initial().to_string(),
                title: t.title().to_string(),
                tagline: t.tagline().to_string(),
                gradient: t.gradient(),
            };
        }

        let badge = tag
            .and_then(|t| t.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string());

        CardContent {
            badge,
            title: FALLBACK_TITLE.to_string(),
            tagline: FALLBACK_TAGLINE.to_string(),
            gradient: FALLBACK_GRADIENT,
        }
    }
}

/// Escape text for inclusion in SVG markup
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the share card for `user_id` and an optional personality tag
pub fn render_share_card(user_id: &str, personality: Option<&str>) -> String {
    let content = CardContent::for_tag(personality);
    let (from, to) = content.gradient;
    let cx = CARD_WIDTH / 2;

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <defs>
    <linearGradient id="bg" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="{from}"/>
      <stop offset="100%" stop-color="{to}"/>
    </linearGradient>
  </defs>
  <rect width="{w}" height="{h}" fill="url(#bg)"/>
  <g font-family="sans-serif" fill="#ffffff" text-anchor="middle">
    <text x="{cx}" y="80" font-size="28" font-weight="bold" opacity="0.9">WEB3 PERSONALITY QUIZ</text>
    <circle cx="{cx}" cy="200" r="75" fill="#ffffff" fill-opacity="0.2"/>
    <text x="{cx}" y="228" font-size="80" font-weight="bold">{badge}</text>
    <text x="{cx}" y="370" font-size="60" font-weight="bold">{title}</text>
    <text x="{cx}" y="440" font-size="30" opacity="0.8">{tagline}</text>
    <text x="{cx}" y="540" font-size="24" opacity="0.7">Farcaster #{user}</text>
  </g>
</svg>
"##,
        w = CARD_WIDTH,
        h = CARD_HEIGHT,
        from = from,
        to = to,
        cx = cx,
        badge = escape_xml(&content.badge),
        title = escape_xml(&content.title),
        tagline = escape_xml(&content.tagline),
        user = escape_xml(user_id),
    )
}
