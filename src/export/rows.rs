//! Tree-to-table transform shared by the CSV and spreadsheet writers.
//!
//! A controller owns N containers; in tabular form it becomes N rows whose
//! first seven columns repeat the controller and whose last eight describe
//! one container each.

use std::fmt;

use crate::items::ControllerItem;

pub const HEADERS: [&str; 15] = [
    "namespace",
    "controllerType",
    "controller",
    "replicas",
    "emptyDir(m)",
    "storage(m)",
    "storageNoSize",
    "containerType",
    "containerName",
    "requestCpu",
    "requestMem(m)",
    "requestEphemeralStorage(m)",
    "limitCpu",
    "limitMem(m)",
    "limitEphemeralStorage(m)",
];

/// Columns describing the controller; the rest describe a container.
pub const CONTROLLER_COLUMNS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

pub fn controller_cells(item: &ControllerItem) -> [Cell; CONTROLLER_COLUMNS] {
    [
        Cell::Text(item.namespace.clone()),
        Cell::Text(item.controller_type.as_str().to_string()),
        Cell::Text(item.controller.clone()),
        Cell::Int(i64::from(item.replicas)),
        Cell::Int(item.empty_dir),
        Cell::Int(item.storage),
        Cell::Bool(item.storage_no_size),
    ]
}

/// One row per container, init containers first.
pub fn container_cells(item: &ControllerItem) -> Vec<[Cell; 8]> {
    item.containers()
        .map(|(kind, c)| {
            [
                Cell::Text(kind.as_str().to_string()),
                Cell::Text(c.name.clone()),
                Cell::Int(c.request_cpu),
                Cell::Int(c.request_mem),
                Cell::Int(c.request_ephemeral_storage),
                Cell::Int(c.limit_cpu),
                Cell::Int(c.limit_mem),
                Cell::Int(c.limit_ephemeral_storage),
            ]
        })
        .collect()
}

/// Full rows with the controller columns repeated on every container row.
/// A controller without containers yields no rows.
pub fn flatten(item: &ControllerItem) -> Vec<Vec<Cell>> {
    let controller = controller_cells(item);
    container_cells(item)
        .into_iter()
        .map(|container| controller.iter().cloned().chain(container).collect())
        .collect()
}
