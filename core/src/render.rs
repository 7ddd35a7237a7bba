//! Presentation-neutral element trees for the search and detail screens.
//!
//! The core never builds markup. It builds `Element` values and hands them to
//! a `Container`; a front end maps them onto whatever it renders with.

use crate::types::{FetchOutcome, LaunchDetail, LaunchSummary, SearchQuery};

/// Marker classes the controller looks elements up by.
pub mod markers {
    pub const LOADING: &str = "loading";
    pub const RESULTS: &str = "results";
    pub const RESULT: &str = "result";
    pub const MESSAGE: &str = "message";
    pub const ERROR: &str = "error";
    pub const DETAIL: &str = "detail";
    /// Every data-bearing element of the detail block carries this class.
    pub const FIELD: &str = "field";
    pub const BACK: &str = "back";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    List,
    Item,
    Link,
    Span,
    Heading1,
    Heading2,
    Paragraph,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub classes: Vec<String>,
    pub text: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            text: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text of this element and all descendants, space separated.
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        if !self.text.is_empty() {
            parts.push(&self.text);
        }
        for child in &self.children {
            child.collect_text(parts);
        }
    }

    /// This element and its descendants carrying `class`, in document order.
    pub fn find_all(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_class(class, &mut found);
        found
    }

    fn collect_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_class(class, found);
        }
    }
}

pub fn loading_indicator() -> Element {
    Element::new(Tag::Div)
        .class(markers::LOADING)
        .text("Fetching data...")
}

/// Exactly one result block: the list, a "no results" message, or an error
/// message. Messages are single nodes with no list items.
pub fn search_results(outcome: &FetchOutcome<Vec<LaunchSummary>>, query: &SearchQuery) -> Element {
    match outcome {
        FetchOutcome::Failed => Element::new(Tag::Paragraph)
            .class(markers::RESULTS)
            .class(markers::ERROR)
            .text(format!("Error while searching for '{query}'")),
        FetchOutcome::Ok(launches) if launches.is_empty() => Element::new(Tag::Paragraph)
            .class(markers::RESULTS)
            .class(markers::MESSAGE)
            .text(format!("No results for '{query}'")),
        FetchOutcome::Ok(launches) => {
            let heading = Element::new(Tag::Span).text(format!("Search results for '{query}'"));
            launches.iter().fold(
                Element::new(Tag::List).class(markers::RESULTS).child(heading),
                |list, launch| list.child(summary_item(launch)),
            )
        }
    }
}

fn summary_item(launch: &LaunchSummary) -> Element {
    let mut item = Element::new(Tag::Item)
        .class(markers::RESULT)
        .child(
            Element::new(Tag::Link)
                .class("name")
                .attr("href", format!("?id={}", launch.id))
                .text(launch.name.clone()),
        )
        .child(
            Element::new(Tag::Span)
                .class("status")
                .text(format!("🚀 {}", launch.status.name)),
        );
    if let Some(mission) = &launch.mission {
        item = item.child(
            Element::new(Tag::Span)
                .class("mission")
                .text(format!("Mission: {mission}")),
        );
    }
    item
}

/// The detail block. On failure it holds only a message and the back link.
pub fn launch_detail(outcome: &FetchOutcome<LaunchDetail>, id: &str) -> Element {
    let block = Element::new(Tag::Div).class(markers::DETAIL);
    let block = match outcome {
        FetchOutcome::Ok(launch) => detail_fields(launch)
            .into_iter()
            .fold(block, |block, field| block.child(field.class(markers::FIELD))),
        FetchOutcome::Failed => block.child(
            Element::new(Tag::Paragraph)
                .class(markers::MESSAGE)
                .text(format!("No launch data found for '{id}'")),
        ),
    };
    block.child(
        Element::new(Tag::Div)
            .class(markers::BACK)
            .child(Element::new(Tag::Link).attr("href", "/").text("Back")),
    )
}

fn detail_fields(launch: &LaunchDetail) -> Vec<Element> {
    let mut fields = vec![Element::new(Tag::Heading1).text(launch.name.clone())];
    if let Some(start) = &launch.window_start {
        fields.push(Element::new(Tag::Span).text(format!("Window opens: {start}")));
    }
    if let Some(end) = &launch.window_end {
        fields.push(Element::new(Tag::Span).text(format!("Window closes: {end}")));
    }
    fields.push(Element::new(Tag::Heading2).text(format!("Status: {}", launch.status.name)));
    if let Some(description) = &launch.status.description {
        fields.push(Element::new(Tag::Paragraph).text(description.clone()));
    }
    if let Some(mission) = &launch.mission {
        fields.push(Element::new(Tag::Heading2).text(format!("Mission: {}", mission.name)));
        if let Some(description) = &mission.description {
            fields.push(Element::new(Tag::Paragraph).text(description.clone()));
        }
    }
    if let Some(image) = &launch.image {
        fields.push(
            Element::new(Tag::Image)
                .attr("src", image.clone())
                .attr("alt", launch.name.clone()),
        );
    }
    fields
}
