/// Read access to whatever holds the cards: the live DOM in the browser, a
/// fake tree in tests.
pub trait CardTree {
    type Node: Clone;

    fn is_card(&self, node: &Self::Node, marker: &str) -> bool;

    /// Cards below `node`, in document order, excluding `node` itself.
    fn cards_within(&self, node: &Self::Node, marker: &str) -> Vec<Self::Node>;

    /// Every card in the document, in document order.
    fn cards_on_page(&self, marker: &str) -> Vec<Self::Node>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardSource {
    Trigger,
    Descendants,
    Page,
    Nothing,
}

/// Collects the cards a click on `trigger` should reveal. The first
/// non-empty source wins: the trigger itself, its descendants, the page.
pub fn discover_cards<T: CardTree>(
    tree: &T,
    trigger: &T::Node,
    marker: &str,
) -> (CardSource, Vec<T::Node>) {
    if tree.is_card(trigger, marker) {
        return (CardSource::Trigger, vec![trigger.clone()]);
    }
    let within = tree.cards_within(trigger, marker);
    if !within.is_empty() {
        return (CardSource::Descendants, within);
    }
    let page = tree.cards_on_page(marker);
    if !page.is_empty() {
        return (CardSource::Page, page);
    }
    (CardSource::Nothing, Vec::new())
}

/// Whether a `class` attribute value carries `marker` as one of its tokens.
pub fn has_class(class_attr: &str, marker: &str) -> bool {
    class_attr.split_ascii_whitespace().any(|token| token == marker)
}
