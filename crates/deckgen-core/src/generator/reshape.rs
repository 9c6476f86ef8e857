//! Per-layout content reshaping.
//!
//! Each layout maps to a reshaper that turns a slide's free-form `content`
//! into the structure its template expects. The heuristics are deliberately
//! simple: line-prefix bullet detection, a paragraph-midpoint column split,
//! and blank-line-delimited cards.

use crate::config::PresentationDefaults;
use crate::outline::{Layout, Slide};

/// Maximum number of bullet items shown on a bullet-list slide.
pub const MAX_BULLETS: usize = 6;
/// Maximum number of cards shown on a grid-cards slide.
pub const MAX_CARDS: usize = 6;
/// Unmarked lines shorter than this (in characters) count as bullet items.
const SHORT_LINE_CHARS: usize = 100;

/// Layout-specific view of a slide's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideBody {
    Title {
        subtitle: String,
        tagline: String,
    },
    Text,
    Bullets {
        items: Vec<String>,
    },
    Columns {
        left_title: String,
        left: String,
        right_title: String,
        right: String,
    },
    Cards {
        cards: Vec<Card>,
    },
}

/// One card on a grid-cards slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub icon: String,
    pub title: String,
    pub content: String,
}

/// A reshaping function.
pub type Reshaper = fn(&Slide, &PresentationDefaults) -> SlideBody;

/// Dispatch table: the reshaper for each layout.
pub fn reshaper(layout: Layout) -> Reshaper {
    match layout {
        Layout::Title => reshape_title,
        Layout::BulletList => reshape_bullets,
        Layout::TwoColumn => reshape_columns,
        Layout::GridCards => reshape_cards,
        Layout::TextHeavy | Layout::Timeline | Layout::Conclusion => reshape_text,
    }
}

/// Reshape `slide` according to its layout.
pub fn reshape(slide: &Slide, defaults: &PresentationDefaults) -> SlideBody {
    reshaper(slide.layout)(slide, defaults)
}

fn reshape_title(slide: &Slide, defaults: &PresentationDefaults) -> SlideBody {
    SlideBody::Title {
        subtitle: slide
            .subtitle
            .clone()
            .unwrap_or_else(|| defaults.title_subtitle.clone()),
        tagline: defaults.tagline.clone(),
    }
}

fn reshape_text(_slide: &Slide, _defaults: &PresentationDefaults) -> SlideBody {
    SlideBody::Text
}

fn reshape_bullets(slide: &Slide, _defaults: &PresentationDefaults) -> SlideBody {
    SlideBody::Bullets {
        items: bullet_items(&slide.content),
    }
}

fn reshape_columns(slide: &Slide, defaults: &PresentationDefaults) -> SlideBody {
    let parts: Vec<&str> = slide.content.split("\n\n").collect();
    let mid = parts.len() / 2;
    SlideBody::Columns {
        left_title: defaults.left_column_title.clone(),
        left: parts[..mid].join("\n\n"),
        right_title: defaults.right_column_title.clone(),
        right: parts[mid..].join("\n\n"),
    }
}

fn reshape_cards(slide: &Slide, defaults: &PresentationDefaults) -> SlideBody {
    let icons = &defaults.card_icons;
    let cards = slide
        .content
        .split("\n\n")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .take(MAX_CARDS)
        .enumerate()
        .map(|(i, part)| {
            let (title, content) = match part.split_once('\n') {
                Some((first, rest)) => (first.to_owned(), rest.to_owned()),
                None => (part.to_owned(), part.to_owned()),
            };
            Card {
                icon: icons
                    .get(i % icons.len().max(1))
                    .cloned()
                    .unwrap_or_default(),
                title,
                content,
            }
        })
        .collect();
    SlideBody::Cards { cards }
}

/// Extract bullet items from free-form text.
///
/// Lines starting with `-`, `•`, `*` or `N.` (N in 1..=9) have their marker
/// stripped; other lines are kept when short. Text with no qualifying lines
/// is split into sentences on `。`. At most [`MAX_BULLETS`] items.
pub fn bullet_items(content: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(item) = strip_marker(line) {
            if !item.is_empty() {
                items.push(item.to_owned());
            }
        } else if line.chars().count() < SHORT_LINE_CHARS {
            items.push(line.to_owned());
        }
    }

    if items.is_empty() {
        items = content
            .split('。')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
    }

    items.truncate(MAX_BULLETS);
    items
}

/// The text after a leading `-`, `•`, `*` or `N.` marker, or `None` for an
/// unmarked line.
fn strip_marker(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix(['-', '•', '*']) {
        return Some(rest.trim_start());
    }
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some('1'..='9'), Some('.')) => Some(chars.as_str().trim_start()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::SlideKind;

    fn slide(layout: Layout, content: &str) -> Slide {
        Slide {
            id: "02".to_owned(),
            kind: SlideKind::Content,
            title: "标题".to_owned(),
            subtitle: None,
            content: content.to_owned(),
            layout,
        }
    }

    fn defaults() -> PresentationDefaults {
        PresentationDefaults::default()
    }

    #[test]
    fn marked_lines_lose_their_markers() {
        let items = bullet_items("- 视觉\n• 语音\n* 文本\n3. 推荐\n10. 十");
        assert_eq!(items, ["视觉", "语音", "文本", "推荐", "10. 十"]);
    }

    #[test]
    fn only_one_marker_is_stripped() {
        let items = bullet_items("- 2020年 起步\n1. 3D 视觉\n-- 破折号");
        assert_eq!(items, ["2020年 起步", "3D 视觉", "- 破折号"]);
    }

    #[test]
    fn long_unmarked_lines_are_skipped() {
        let long = "长".repeat(120);
        let items = bullet_items(&format!("短句\n{long}\n- 要点"));
        assert_eq!(items, ["短句", "要点"]);
    }

    #[test]
    fn falls_back_to_sentences() {
        let long = "字".repeat(60);
        let content = format!("{long}。{long}。{long}");
        let items = bullet_items(&format!("{content}{content}"));
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|i| !i.contains('。')));
    }

    #[test]
    fn bullets_are_capped_at_six() {
        let content = (1..=20).map(|i| format!("- item {i}")).collect::<Vec<_>>().join("\n");
        let items = bullet_items(&content);
        assert_eq!(items.len(), MAX_BULLETS);
        assert_eq!(items[5], "item 6");
    }

    #[test]
    fn sentence_fallback_is_capped_too() {
        let sentence = format!("{}。", "字".repeat(120));
        assert_eq!(bullet_items(&sentence.repeat(10)).len(), MAX_BULLETS);
    }

    #[test]
    fn columns_split_at_paragraph_midpoint() {
        let body = reshape(&slide(Layout::TwoColumn, "a\n\nb\n\nc\n\nd\n\ne"), &defaults());
        assert_eq!(
            body,
            SlideBody::Columns {
                left_title: "方面一".to_owned(),
                left: "a\n\nb".to_owned(),
                right_title: "方面二".to_owned(),
                right: "c\n\nd\n\ne".to_owned(),
            }
        );
    }

    #[test]
    fn single_paragraph_goes_to_right_column() {
        let SlideBody::Columns { left, right, .. } = reshape(&slide(Layout::TwoColumn, "only"), &defaults()) else {
            panic!("expected columns");
        };
        assert_eq!(left, "");
        assert_eq!(right, "only");
    }

    #[test]
    fn cards_take_first_line_as_title() {
        let body = reshape(&slide(Layout::GridCards, "标题一\n正文一\n更多\n\n单行卡片"), &defaults());
        let SlideBody::Cards { cards } = body else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "标题一");
        assert_eq!(cards[0].content, "正文一\n更多");
        assert_eq!(cards[1].title, "单行卡片");
        assert_eq!(cards[1].content, "单行卡片");
    }

    #[test]
    fn card_icons_cycle() {
        let mut defaults = defaults();
        defaults.card_icons = vec!["A".to_owned(), "B".to_owned()];
        let body = reshape(&slide(Layout::GridCards, "1\n\n2\n\n3\n\n4\n\n5\n\n6\n\n7\n\n8"), &defaults);
        let SlideBody::Cards { cards } = body else {
            panic!("expected cards");
        };
        let icons: Vec<&str> = cards.iter().map(|c| c.icon.as_str()).collect();
        assert_eq!(icons, ["A", "B", "A", "B", "A", "B"]);
    }

    #[test]
    fn title_uses_default_subtitle_and_tagline() {
        let mut s = slide(Layout::Title, "");
        assert_eq!(
            reshape(&s, &defaults()),
            SlideBody::Title {
                subtitle: "智能生成演示文稿".to_owned(),
                tagline: "基于AI技术的自动化幻灯片生成".to_owned(),
            }
        );

        s.subtitle = Some("自定义".to_owned());
        let SlideBody::Title { subtitle, .. } = reshape(&s, &defaults()) else {
            panic!("expected title");
        };
        assert_eq!(subtitle, "自定义");
    }

    #[test]
    fn text_layouts_share_the_text_reshaper() {
        for layout in [Layout::TextHeavy, Layout::Timeline, Layout::Conclusion] {
            assert_eq!(reshape(&slide(layout, "x"), &defaults()), SlideBody::Text);
        }
    }
}
