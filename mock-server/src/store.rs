//! In-memory tables keyed by integer id.
//!
//! Rows are kept as JSON objects: the mock only needs to echo back what it
//! was given, plus `id`, and to filter on a handful of fields.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

#[derive(Debug, Default)]
pub struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Row>,
}

impl Table {
    pub fn insert(&mut self, mut row: Row) -> Row {
        self.last_id += 1;
        row.insert("id".to_string(), Value::from(self.last_id));
        self.rows.insert(self.last_id, row.clone());
        row
    }

    pub fn get(&self, id: i64) -> Option<&Row> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut Row> {
        self.rows.get_mut(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    /// Overwrite the given fields, leaving the others and `id` untouched.
    pub fn merge(&mut self, id: i64, changes: Row) -> Option<Row> {
        let row = self.rows.get_mut(&id)?;
        for (key, value) in changes {
            if key != "id" {
                row.insert(key, value);
            }
        }
        Some(row.clone())
    }

    pub fn remove(&mut self, id: i64) -> Option<Row> {
        self.rows.remove(&id)
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    pub fn page(&self, skip: usize, limit: usize) -> Vec<Row> {
        self.rows.values().skip(skip).take(limit).cloned().collect()
    }

    /// Rows whose `field` equals `value`.
    pub fn filter_eq(&self, field: &str, value: i64) -> Vec<Row> {
        self.rows
            .values()
            .filter(|row| row.get(field).and_then(Value::as_i64) == Some(value))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct Store {
    pub cursos: Table,
    pub docentes: Table,
    pub ucs: Table,
    pub calendarios: Table,
    pub alocacoes: Table,
}

/// The stored collections that share list/create/get/update/delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Curso,
    Docente,
    Uc,
    Calendario,
}

impl Kind {
    pub fn not_found(self) -> &'static str {
        match self {
            Kind::Curso => "Curso não encontrado",
            Kind::Docente => "Docente não encontrado",
            Kind::Uc => "UC não encontrada",
            Kind::Calendario => "Calendário não encontrado",
        }
    }

    pub fn deleted(self) -> &'static str {
        match self {
            Kind::Curso => "Curso deletado com sucesso",
            Kind::Docente => "Docente deletado com sucesso",
            Kind::Uc => "UC deletada com sucesso",
            Kind::Calendario => "Calendário deletado com sucesso",
        }
    }

    /// Fields that must be present on create.
    pub fn required(self) -> &'static [&'static str] {
        match self {
            Kind::Curso => &["nome", "carga_horaria"],
            Kind::Docente => &["nome"],
            Kind::Uc => &["nome", "carga_horaria"],
            Kind::Calendario => &["curso_id", "mes", "ano"],
        }
    }
}

impl Store {
    pub fn table(&self, kind: Kind) -> &Table {
        match kind {
            Kind::Curso => &self.cursos,
            Kind::Docente => &self.docentes,
            Kind::Uc => &self.ucs,
            Kind::Calendario => &self.calendarios,
        }
    }

    pub fn table_mut(&mut self, kind: Kind) -> &mut Table {
        match kind {
            Kind::Curso => &mut self.cursos,
            Kind::Docente => &mut self.docentes,
            Kind::Uc => &mut self.ucs,
            Kind::Calendario => &mut self.calendarios,
        }
    }
}
