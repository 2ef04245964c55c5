//! Compiles a serialized filter into a connector's native predicate.
//!
//! The stages are: parse, prune what the connector cannot evaluate, rewrite
//! fixed-width character comparisons, flatten and serialize. Every stage may
//! only widen the set of rows the predicate accepts, so the query engine can
//! always re-apply the original filter to what the source returns.

use super::explain::Explain;
use crate::error::PushdownError;
use connectors::{connector::FilterConnector, serializer::FilterSerializer};
use engine_config::settings::validated::ValidatedSettings;
use filter_syntax::{builder::NodeBuilder, parser::FilterParser};
use model::{
    core::{column::ColumnDescriptor, data_type::DataType},
    filter::{flat::Filter, node::Node},
};
use planner::{
    prune::{SupportedDataTypePruner, SupportedOperatorPruner},
    rewrite::BpCharTransformer,
    traverse::{TreeTraverser, TreeVisitor},
};
use std::collections::HashSet;
use tracing::{debug, info};

pub struct PushdownCompiler<'a> {
    connector: &'a dyn FilterConnector,
    columns: &'a [ColumnDescriptor],
    rewrite_bpchar: bool,
    supported_types: Option<HashSet<DataType>>,
}

impl<'a> PushdownCompiler<'a> {
    pub fn new(connector: &'a dyn FilterConnector, columns: &'a [ColumnDescriptor]) -> Self {
        Self {
            connector,
            columns,
            rewrite_bpchar: false,
            supported_types: None,
        }
    }

    pub fn from_settings(settings: &'a ValidatedSettings) -> Self {
        Self::new(settings.connector().as_filter(), settings.columns())
            .with_bpchar_rewrite(settings.rewrite_bpchar())
            .with_supported_types(settings.supported_types().cloned())
    }

    pub fn with_bpchar_rewrite(mut self, enabled: bool) -> Self {
        self.rewrite_bpchar = enabled;
        self
    }

    /// Restricts push-down to comparisons on columns of these types.
    pub fn with_supported_types(mut self, types: Option<HashSet<DataType>>) -> Self {
        self.supported_types = types;
        self
    }

    /// Returns the native predicate, or `None` when nothing can be pushed down.
    pub fn compile(&self, filter: &str) -> Result<Option<String>, PushdownError> {
        Ok(self.explain(filter)?.filter)
    }

    pub fn explain(&self, filter: &str) -> Result<Explain, PushdownError> {
        let parsed = FilterParser::with_columns(self.columns).parse(filter, &NodeBuilder)?;
        let parsed_text = parsed.to_string();

        let traverser = TreeTraverser::new();
        let passes = self.pruning_passes();
        let visitors: Vec<&dyn TreeVisitor> = passes.iter().map(|pass| pass.as_ref()).collect();
        let pruned = traverser.traverse(parsed, &visitors)?;
        let pruned_text = pruned.as_ref().map(Node::to_string);

        let rewritten = match pruned {
            Some(node) if self.rewrite_bpchar => {
                traverser.traverse(node, &[&BpCharTransformer::new(self.columns)])?
            }
            other => other,
        };
        let rewritten_text = rewritten.as_ref().map(Node::to_string);

        let rendered = match rewritten {
            Some(node) => {
                let flat = Filter::try_from(node)?;
                FilterSerializer::new(self.connector, self.columns).serialize(&flat)?
            }
            None => None,
        };

        match &rendered {
            Some(text) => info!(filter = %text, "Pushed down filter"),
            None => info!("No filter could be pushed down"),
        }

        Ok(Explain {
            parsed: parsed_text,
            pruned: pruned_text,
            rewritten: rewritten_text,
            filter: rendered,
        })
    }

    fn pruning_passes(&self) -> Vec<Box<dyn TreeVisitor + '_>> {
        let mut passes: Vec<Box<dyn TreeVisitor + '_>> = vec![Box::new(
            SupportedOperatorPruner::new(self.connector.capabilities().all()),
        )];

        if let Some(types) = &self.supported_types {
            debug!(types = types.len(), "Pruning by column data type");
            passes.push(Box::new(SupportedDataTypePruner::new(self.columns, types.clone())));
        }
        passes
    }
}
