// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Column layout for the graph view.
//!
//! Blocks are laid out left to right along the supply chain: each block lands in the column
//! whose name its id contains, and blocks that match no column go to `Process`.

use std::collections::BTreeMap;

use crate::model::{BlockId, Ontology};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Supplier,
    Material,
    Process,
    Facility,
    Product,
    Order,
    Shipment,
    Inventory,
    Market,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Self::Supplier,
        Self::Material,
        Self::Process,
        Self::Facility,
        Self::Product,
        Self::Order,
        Self::Shipment,
        Self::Inventory,
        Self::Market,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Supplier => "Supplier",
            Self::Material => "Material",
            Self::Process => "Process",
            Self::Facility => "Facility",
            Self::Product => "Product",
            Self::Order => "Order",
            Self::Shipment => "Shipment",
            Self::Inventory => "Inventory",
            Self::Market => "Market",
        }
    }

    /// Column for a block id; the first column name contained in the id wins.
    pub fn for_block(id: &str) -> Self {
        let id = id.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|column| id.contains(&column.label().to_lowercase()))
            .unwrap_or(Self::Process)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPlacement {
    column: usize,
    row: usize,
}

impl BlockPlacement {
    /// Index into [`GraphLayout::columns`], not into [`Column::ALL`].
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }
}

/// Non-empty columns in supply-chain order, each listing its blocks in ontology order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphLayout {
    columns: Vec<(Column, Vec<BlockId>)>,
    placements: BTreeMap<BlockId, BlockPlacement>,
}

impl GraphLayout {
    pub fn columns(&self) -> &[(Column, Vec<BlockId>)] {
        &self.columns
    }

    pub fn placement(&self, id: &BlockId) -> Option<BlockPlacement> {
        self.placements.get(id).copied()
    }

    pub fn block_at(&self, column: usize, row: usize) -> Option<&BlockId> {
        self.columns.get(column).and_then(|(_, blocks)| blocks.get(row))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Block reached by moving `dx` columns and `dy` rows from `from`, clamped to the grid.
    ///
    /// Horizontal moves keep the row when the target column is tall enough and otherwise land
    /// on its last block. With no starting block the first block of the first column is returned.
    pub fn step(&self, from: Option<&BlockId>, dx: isize, dy: isize) -> Option<&BlockId> {
        let Some(placement) = from.and_then(|id| self.placement(id)) else {
            return self.block_at(0, 0);
        };

        let column = clamp_index(placement.column, dx, self.columns.len());
        let height = self.columns[column].1.len();
        let row = clamp_index(placement.row.min(height.saturating_sub(1)), dy, height);
        self.block_at(column, row)
    }
}

pub fn layout_graph(ontology: &Ontology) -> GraphLayout {
    let mut by_column: BTreeMap<Column, Vec<BlockId>> = BTreeMap::new();
    for block in &ontology.blocks {
        by_column.entry(Column::for_block(block.id.as_str())).or_default().push(block.id.clone());
    }

    let mut placements = BTreeMap::new();
    let columns = by_column.into_iter().collect::<Vec<_>>();
    for (column_idx, (_, blocks)) in columns.iter().enumerate() {
        for (row, id) in blocks.iter().enumerate() {
            placements.insert(id.clone(), BlockPlacement { column: column_idx, row });
        }
    }

    GraphLayout { columns, placements }
}

fn clamp_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{layout_graph, Column};
    use crate::model::demo_ontology;
    use crate::model::fixtures::{block_id, relabeled_pair, supply_chain_small};

    #[rstest]
    #[case("Supplier", Column::Supplier)]
    #[case("blk:raw_material", Column::Material)]
    #[case("InventoryBuffer", Column::Inventory)]
    #[case("productOrder", Column::Product)]
    #[case("blk:vendor", Column::Process)]
    fn classifies_by_first_contained_column_name(#[case] id: &str, #[case] expected: Column) {
        assert_eq!(Column::for_block(id), expected);
    }

    #[test]
    fn demo_lays_out_one_block_per_column_in_chain_order() {
        let layout = layout_graph(&demo_ontology());
        let columns = layout.columns().iter().map(|(column, _)| *column).collect::<Vec<_>>();
        assert_eq!(columns, Column::ALL.to_vec());
        assert!(layout.columns().iter().all(|(_, blocks)| blocks.len() == 1));
    }

    #[test]
    fn unmatched_ids_share_the_process_column() {
        let layout = layout_graph(&relabeled_pair());
        assert_eq!(layout.columns().len(), 1);
        assert_eq!(layout.columns()[0].0, Column::Process);
        assert_eq!(layout.block_at(0, 1), Some(&block_id("blk:plant")));
    }

    #[test]
    fn step_moves_and_clamps() {
        let layout = layout_graph(&supply_chain_small());
        let supplier = block_id("Supplier");
        let material = block_id("Material");

        assert_eq!(layout.step(None, 1, 0), Some(&supplier));
        assert_eq!(layout.step(Some(&supplier), 1, 0), Some(&material));
        assert_eq!(layout.step(Some(&material), 5, 3), Some(&material));
        assert_eq!(layout.step(Some(&material), -9, 0), Some(&supplier));
    }
}
