//! Report components: the page header plus one flow element per section
//! kind, assembled from the data payloads.

pub mod gauge;
pub mod header;
pub mod icon_card;
pub mod list;
pub mod score;
pub mod table;
pub mod title;

use crate::flow::{Element, Spacer, Split};
use crate::geometry::{spacing, Size};
use crate::model::{ListData, SectionComponent};
use crate::style::StyleSheet;
use crate::surface::Surface;

use gauge::GaugeCardList;
use icon_card::IconCardList;
use list::KeyValueList;
use score::ScoreChart;
use table::TableFlow;
use title::SectionTitle;

/// A titled section as a single flow element.
///
/// The title and any lead-in content (a table's overview list) are never
/// left stranded at the bottom of a page: a split that cannot carry at
/// least part of the section body along defers the whole section. Only
/// the body child itself decides whether it can break, so sections whose
/// body is atomic move to the next page as one block.
pub struct Section {
    children: Vec<Box<dyn Element>>,
    /// Number of leading children that must be followed by body content.
    lead_in: usize,
    heights: Vec<f64>,
}

impl Section {
    pub fn new(children: Vec<Box<dyn Element>>, lead_in: usize) -> Self {
        Self {
            children,
            lead_in,
            heights: Vec::new(),
        }
    }
}

impl Element for Section {
    fn measure(&mut self, max_width: f64, max_height: f64) -> Size {
        self.heights = self
            .children
            .iter_mut()
            .map(|c| c.measure(max_width, max_height).height)
            .collect();
        Size::new(max_width, self.heights.iter().sum())
    }

    fn render(&self, surface: &mut Surface, x: f64, y: f64) {
        let mut cursor = y;
        for (child, height) in self.children.iter().zip(&self.heights) {
            child.render(surface, x, cursor);
            cursor += height;
        }
    }

    fn split(&mut self, max_width: f64, max_height: f64) -> Split {
        if self.heights.len() != self.children.len() {
            self.measure(max_width, max_height);
        }

        let mut used = 0.0;
        let mut break_at = None;
        for (i, height) in self.heights.iter().enumerate() {
            if used + height > max_height {
                break_at = Some(i);
                break;
            }
            used += height;
        }
        let Some(at) = break_at else {
            let fitted = std::mem::take(&mut self.children);
            return Split::Parts {
                fitted,
                remainder: Vec::new(),
            };
        };

        let mut children = std::mem::take(&mut self.children);
        let mut rest = children.split_off(at);
        let mut boundary = rest.remove(0);

        match boundary.split(max_width, max_height - used) {
            Split::Parts {
                fitted: part,
                remainder: carry,
            } if !part.is_empty() => {
                if at < self.lead_in {
                    // A lead-in child split means the section head itself
                    // does not fit; move the whole section on.
                    children.push(boundary_reassemble(part, carry));
                    children.extend(rest);
                    return defer_with(self, children);
                }
                children.extend(part);
                let mut remainder: Vec<Box<dyn Element>> = carry;
                remainder.extend(rest);
                Split::Parts {
                    fitted: children,
                    remainder: vec![Box::new(Section::new(remainder, 0))],
                }
            }
            _ => {
                if at <= self.lead_in {
                    children.push(boundary);
                    children.extend(rest);
                    return defer_with(self, children);
                }
                let mut remainder = vec![boundary];
                remainder.extend(rest);
                // Trailing spacers stay with the remainder side.
                while children.last().map(|c| c.is_spacer()).unwrap_or(false) {
                    children.pop();
                }
                Split::Parts {
                    fitted: children,
                    remainder: vec![Box::new(Section::new(remainder, 0))],
                }
            }
        }
    }
}

fn defer_with(section: &mut Section, children: Vec<Box<dyn Element>>) -> Split {
    section.children = children;
    section.heights.clear();
    Split::Defer
}

fn boundary_reassemble(
    mut part: Vec<Box<dyn Element>>,
    carry: Vec<Box<dyn Element>>,
) -> Box<dyn Element> {
    part.extend(carry);
    Box::new(Section::new(part, 0))
}

/// Build the flow element for one report section.
pub fn build_section(component: &SectionComponent, styles: &StyleSheet) -> Box<dyn Element> {
    let mut children: Vec<Box<dyn Element>> = Vec::new();
    let title = match component {
        SectionComponent::List { title, .. }
        | SectionComponent::IconCards { title, .. }
        | SectionComponent::Score { title, .. }
        | SectionComponent::GaugeCards { title, .. }
        | SectionComponent::Table { title, .. } => title,
    };
    children.push(SectionTitle::boxed(title, styles.title.clone()));
    children.push(Spacer::boxed(spacing::PADDING));

    match component {
        SectionComponent::List { data, .. } => {
            let lead_in = children.len();
            children.push(KeyValueList::boxed(data.clone(), styles));
            Box::new(Section::new(children, lead_in))
        }
        SectionComponent::IconCards { cards, .. } => {
            let lead_in = children.len();
            children.push(IconCardList::boxed(cards.clone(), styles));
            Box::new(Section::new(children, lead_in))
        }
        SectionComponent::Score { data, .. } => {
            let lead_in = children.len();
            children.push(ScoreChart::boxed(data.clone(), styles));
            Box::new(Section::new(children, lead_in))
        }
        SectionComponent::GaugeCards { data, .. } => {
            let lead_in = children.len();
            children.push(GaugeCardList::boxed(data.clone(), styles));
            Box::new(Section::new(children, lead_in))
        }
        SectionComponent::Table { data, .. } => {
            if !data.overview.is_empty() {
                let overview = ListData::from_pairs(data.overview.clone());
                children.push(KeyValueList::boxed(overview, styles));
                children.push(Spacer::boxed(spacing::PADDING));
            }
            let lead_in = children.len();
            children.push(TableFlow::boxed(data.clone(), styles));
            Box::new(Section::new(children, lead_in))
        }
    }
}
