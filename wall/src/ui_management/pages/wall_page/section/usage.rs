use ratatui::{
    style::Stylize,
    text::{Line, Span, Text},
};

#[derive(Debug, Clone)]
pub struct UsageInfoLine {
    pub keys: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct UsageInfo {
    pub description: Option<String>,
    pub lines: Vec<UsageInfoLine>,
}

pub trait HasUsageInfo {
    fn usage_info(&self) -> UsageInfo;
}

fn key_to_span<'a>(key: &str) -> Span<'a> {
    Span::from(format!("({})", key)).bold()
}

/// Joins key bindings the way they are read out: "(a)", "(a) or (b)", "(a), (b) or (c)"
fn bindings_to_spans<'a>(keys: &[String]) -> Vec<Span<'a>> {
    let mut spans: Vec<Span> = Vec::with_capacity(keys.len() * 2);

    for (idx, key) in keys.iter().enumerate() {
        if idx > 0 {
            spans.push(if idx + 1 == keys.len() { " or ".into() } else { ", ".into() });
        }

        spans.push(key_to_span(key));
    }

    spans
}

pub fn widget_usage_to_text<'a>(usage: UsageInfo) -> Text<'a> {
    let mut lines: Vec<Line> = vec![];
    if let Some(description) = usage.description {
        lines.push(Line::from(Span::from(description).italic()));
    }

    for line in usage.lines {
        let mut spans = bindings_to_spans(&line.keys);
        spans.push(Span::from(format!(" {}", line.description)));

        lines.push(Line::from(spans));
    }

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(spans: &[Span]) -> String {
        spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|key| String::from(*key)).collect()
    }

    #[test]
    fn test_bindings_are_joined_for_reading() {
        assert_eq!(plain(&bindings_to_spans(&keys(&[]))), "");
        assert_eq!(plain(&bindings_to_spans(&keys(&["q"]))), "(q)");
        assert_eq!(plain(&bindings_to_spans(&keys(&["←", "→"]))), "(←) or (→)");
        assert_eq!(
            plain(&bindings_to_spans(&keys(&["Enter", "c", "y"]))),
            "(Enter), (c) or (y)"
        );
    }

    #[test]
    fn test_usage_text_lines() {
        let text = widget_usage_to_text(UsageInfo {
            description: Some("Select a widget".into()),
            lines: vec![UsageInfoLine {
                keys: keys(&["q"]),
                description: "to exit".into(),
            }],
        });

        assert_eq!(text.lines.len(), 2);
        assert_eq!(plain(&text.lines[1].spans), "(q) to exit");
    }
}
