//! Alignment constants for boxes, rows and columns

use serde::Serialize;

use crate::directive::argument::ArgumentNode;

/// Two-dimensional alignment inside a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Alignment {
    TopStart,
    TopCenter,
    TopEnd,
    CenterStart,
    Center,
    CenterEnd,
    BottomStart,
    BottomCenter,
    BottomEnd,
}

/// Alignment along the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum HorizontalAlignment {
    Start,
    CenterHorizontally,
    End,
}

/// Alignment along the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum VerticalAlignment {
    Top,
    CenterVertically,
    Bottom,
}

/// Any of the three alignment families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "axis", content = "value", rename_all = "snake_case")]
pub enum AlignmentValue {
    /// 9-way box alignment.
    Both(Alignment),
    /// Horizontal (used inside columns).
    Horizontal(HorizontalAlignment),
    /// Vertical (used inside rows).
    Vertical(VerticalAlignment),
}

/// `Alignment.TopStart` ... `Alignment.BottomEnd`.
pub fn alignment(node: &ArgumentNode) -> Option<Alignment> {
    let alignment = match node.member()? {
        "TopStart" => Alignment::TopStart,
        "TopCenter" => Alignment::TopCenter,
        "TopEnd" => Alignment::TopEnd,
        "CenterStart" => Alignment::CenterStart,
        "Center" => Alignment::Center,
        "CenterEnd" => Alignment::CenterEnd,
        "BottomStart" => Alignment::BottomStart,
        "BottomCenter" => Alignment::BottomCenter,
        "BottomEnd" => Alignment::BottomEnd,
        _ => return None,
    };
    Some(alignment)
}

/// `Alignment.Start`, `Alignment.CenterHorizontally`, `Alignment.End`.
pub fn horizontal(node: &ArgumentNode) -> Option<HorizontalAlignment> {
    match node.member()? {
        "Start" => Some(HorizontalAlignment::Start),
        "CenterHorizontally" => Some(HorizontalAlignment::CenterHorizontally),
        "End" => Some(HorizontalAlignment::End),
        _ => None,
    }
}

/// `Alignment.Top`, `Alignment.CenterVertically`, `Alignment.Bottom`.
pub fn vertical(node: &ArgumentNode) -> Option<VerticalAlignment> {
    match node.member()? {
        "Top" => Some(VerticalAlignment::Top),
        "CenterVertically" => Some(VerticalAlignment::CenterVertically),
        "Bottom" => Some(VerticalAlignment::Bottom),
        _ => None,
    }
}

/// Whichever family the reference names.
pub fn any_alignment(node: &ArgumentNode) -> Option<AlignmentValue> {
    alignment(node)
        .map(AlignmentValue::Both)
        .or_else(|| horizontal(node).map(AlignmentValue::Horizontal))
        .or_else(|| vertical(node).map(AlignmentValue::Vertical))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_expression;

    fn node(src: &str) -> ArgumentNode {
        ArgumentNode::positional(parse_expression(src).unwrap(), 0)
    }

    #[test]
    fn families_do_not_overlap() {
        assert_eq!(alignment(&node("Alignment.BottomEnd")), Some(Alignment::BottomEnd));
        assert_eq!(alignment(&node("Alignment.Start")), None);
        assert_eq!(horizontal(&node("Alignment.Start")), Some(HorizontalAlignment::Start));
        assert_eq!(horizontal(&node("Alignment.Top")), None);
        assert_eq!(vertical(&node(".CenterVertically")), Some(VerticalAlignment::CenterVertically));
        assert_eq!(
            any_alignment(&node("Alignment.Bottom")),
            Some(AlignmentValue::Vertical(VerticalAlignment::Bottom))
        );
        assert_eq!(any_alignment(&node("12")), None);
    }
}
