//! Set extractor for the nested `groupfilter` grammar.
//!
//! ```xml
//! <group caption='Top Customers' name='[Set 1]' user:ui-builder='filter-group'>
//!   <groupfilter count='10' end='top' function='end'>
//!     <groupfilter direction='DESC' expression='SUM([Sales])' function='order'>
//!       <groupfilter function='level-members' level='[Customer Name]' />
//!     </groupfilter>
//!   </groupfilter>
//! </group>
//! ```
//!
//! The combinator directly under the group decides the kind:
//!
//! - `union` - `member` children → manual selection, `reference` children → combined set
//! - `filter` - condition
//! - `end` - top N

use super::context::{ExtractionContext, collect_runs};
use super::types::{SetDefinition, SetKind};
use crate::base::{DiagnosticKind, Diagnostics};
use crate::tree::Node;

const FILTER_GROUP: &str = "filter-group";

/// Field state accumulated while walking one set's combinators.
#[derive(Default)]
struct SetFields {
    element: String,
    kind: Option<SetKind>,
    condition: String,
    number: String,
    end: String,
    direction: String,
    expression: String,
    members: Vec<String>,
}

impl SetFields {
    fn apply_union(&mut self, union: &Node) {
        for node in union.children_named("groupfilter") {
            match node.attr("function") {
                "member" => {
                    self.members.push(node.attr("member").to_string());
                    self.element = node.attr("level").to_string();
                    self.kind = Some(SetKind::ManualSelection);
                }
                "reference" => {
                    self.members.push(node.attr("field").to_string());
                    self.kind = Some(SetKind::CombinedSet);
                }
                _ => {}
            }
        }
    }

    fn apply_filter(&mut self, filter: &Node) {
        self.condition = filter.attr("expression").to_string();
        for node in filter.children_named("groupfilter") {
            self.element = node.attr("level").to_string();
        }
        self.kind = Some(SetKind::Condition);
    }

    fn apply_end(&mut self, end: &Node) {
        self.end = end.attr("end").to_string();
        self.number = end.attr("count").to_string();
        for order in end.children_named("groupfilter") {
            self.direction = order.attr("direction").to_string();
            self.condition = order.attr("expression").to_string();
            for element in order.children_named("groupfilter") {
                if element.attr_is("function", "level-members") {
                    self.element = element.attr("level").to_string();
                } else {
                    self.expression = element.attr("expression").to_string();
                    for base in element.children_named("groupfilter") {
                        self.element = base.attr("level").to_string();
                    }
                }
            }
        }
        self.kind = Some(SetKind::TopN);
    }
}

pub(super) fn extract_sets(
    sets: &mut Vec<SetDefinition>,
    diagnostics: &mut Diagnostics,
    ctx: &ExtractionContext<'_>,
    datasource: &Node,
) {
    let groups = datasource
        .children_named("group")
        .filter(|group| group.attr_local("ui-builder") == FILTER_GROUP);

    for group in groups {
        let mut fields = SetFields::default();
        let mut combinators = 0;
        for groupfilter in group.children_named("groupfilter") {
            match groupfilter.attr("function") {
                "union" => fields.apply_union(groupfilter),
                "filter" => fields.apply_filter(groupfilter),
                "end" => fields.apply_end(groupfilter),
                _ => continue,
            }
            combinators += 1;
        }

        let name = group.attr("name");
        if combinators > 1 {
            diagnostics.push(
                DiagnosticKind::AmbiguousSet,
                &ctx.datasource,
                format!("{name} has {combinators} combinators; the last one decides its type"),
            );
        }

        sets.push(SetDefinition {
            datasource: ctx.datasource.clone(),
            caption: group.attr("caption").to_string(),
            name: name.to_string(),
            element: fields.element,
            set_type: fields.kind.map(SetKind::as_str).unwrap_or_default().to_string(),
            condition_calculation: fields.condition,
            number: fields.number,
            end: fields.end,
            direction: fields.direction,
            members: fields.members.join("|"),
            expression: fields.expression,
            description: collect_runs(group),
        });
    }
    tracing::info!("Found {} sets", sets.len());
}
