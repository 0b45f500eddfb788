//! Up-navigation: which symbols of the previous levels contain a symbol.

use std::collections::BTreeSet;

use serde::Serialize;
use symdex_common::{Result, error::Error};

use crate::{
    index::SymbolIndex,
    level::Level,
    symbol_table::{SymbolId, SymbolTable},
};

/// Nested containers of a symbol, expanded up to a stop level.
///
/// Nodes at the stop level are leaves. A node with several containers
/// branches; the same container can appear in several branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerTree {
    pub symbol: SymbolId,
    pub level: Level,
    /// Subtrees for the direct containers, ordered by id.
    pub containers: Vec<ContainerTree>,
}

impl ContainerTree {
    pub fn is_leaf(&self) -> bool {
        self.containers.is_empty()
    }

    /// Distinct symbols of the leaves.
    pub fn leaves(&self) -> BTreeSet<SymbolId> {
        let mut leaves = BTreeSet::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves(&self, leaves: &mut BTreeSet<SymbolId>) {
        if self.is_leaf() {
            leaves.insert(self.symbol);
        }
        for container in &self.containers {
            container.collect_leaves(leaves);
        }
    }

    /// Indented text rendering, one `level symbol` line per node.
    pub fn render(&self, symbols: &SymbolTable) -> Result<String> {
        let mut out = String::new();
        self.render_into(symbols, 0, &mut out)?;
        Ok(out)
    }

    fn render_into(&self, symbols: &SymbolTable, depth: usize, out: &mut String) -> Result<()> {
        out.push_str(&"  ".repeat(depth));
        out.push_str(self.level.letter());
        out.push(' ');
        out.push_str(symbols.resolve(self.symbol)?);
        out.push('\n');
        for container in &self.containers {
            container.render_into(symbols, depth + 1, out)?;
        }
        Ok(())
    }
}

impl SymbolIndex {
    /// Symbols of the previous level whose decomposition includes `symbol`.
    ///
    /// At `T`, which has no previous level, this is `{symbol}` itself.
    pub fn direct_containers(&self, symbol: SymbolId, level: Level) -> Result<BTreeSet<SymbolId>> {
        if level == Level::Text {
            return if self.indexes.contains(Level::Text, symbol) {
                Ok(BTreeSet::from([symbol]))
            } else {
                Err(Error::unknown_symbol(symbol))
            };
        }
        self.indexes
            .containers(level, symbol)
            .map(|containers| containers.keys().copied().collect())
            .ok_or_else(|| Error::unknown_symbol(symbol))
    }

    /// Expands the containers of `symbol` level by level up to `stop_level`.
    ///
    /// `stop_level` must not come after `level` in the chain.
    pub fn containers_tree(
        &self,
        symbol: SymbolId,
        level: Level,
        stop_level: Level,
    ) -> Result<ContainerTree> {
        if stop_level > level {
            return Err(Error::invalid_arg(
                "stop_level",
                format!("{stop_level} does not precede {level}"),
            ));
        }
        if !self.indexes.contains(level, symbol) {
            return Err(Error::unknown_symbol(symbol));
        }
        self.expand_containers(symbol, level, stop_level)
    }

    /// Distinct containers of `symbol` at `stop_level`: the leaves of
    /// [`SymbolIndex::containers_tree`].
    pub fn transitive_containers(
        &self,
        symbol: SymbolId,
        level: Level,
        stop_level: Level,
    ) -> Result<BTreeSet<SymbolId>> {
        Ok(self.containers_tree(symbol, level, stop_level)?.leaves())
    }

    // Depth is bounded by the length of the level chain.
    fn expand_containers(
        &self,
        symbol: SymbolId,
        level: Level,
        stop_level: Level,
    ) -> Result<ContainerTree> {
        let mut tree = ContainerTree {
            symbol,
            level,
            containers: Vec::new(),
        };
        let Some(previous) = level.previous().filter(|_| level != stop_level) else {
            return Ok(tree);
        };
        for container in self.direct_containers(symbol, level)? {
            tree.containers
                .push(self.expand_containers(container, previous, stop_level)?);
        }
        Ok(tree)
    }
}
