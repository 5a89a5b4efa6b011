//! Typed request payloads for the scheduling API.
//!
//! # Design
//! Responses are handed back as `serde_json::Value` exactly as the service
//! sent them; only the write side gets structs, so callers do not have to
//! assemble JSON by hand. Field names are the service's wire names. Update
//! payloads skip unset fields, and the service leaves those unchanged.
//! Nothing here is validated locally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of any stored entity.
pub type Id = i64;

/// Request payload for creating a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCourse {
    pub nome: String,
    pub carga_horaria: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fases: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carga_horaria: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fases: Option<String>,
}

/// Request payload for creating an instructor.
///
/// `disponibilidade` maps a weekday name to whether the instructor teaches
/// that day; `horarios` maps a weekday to slot-label/time pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewInstructor {
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especialidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matricula: Option<i64>,
    #[serde(default)]
    pub carga_horaria_total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_docente: Option<i32>,
    #[serde(default)]
    pub saldo_horas: f64,
    #[serde(default)]
    pub restricoes_dias: Vec<i32>,
    #[serde(default)]
    pub disciplinas: Vec<String>,
    #[serde(default)]
    pub disponibilidade: BTreeMap<String, bool>,
    #[serde(default)]
    pub horarios: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    pub ucs_ids: Vec<Id>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstructorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub especialidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matricula: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carga_horaria_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_docente: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saldo_horas: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricoes_dias: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disciplinas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disponibilidade: Option<BTreeMap<String, bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horarios: Option<BTreeMap<String, BTreeMap<String, String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ucs_ids: Option<Vec<Id>>,
}

/// Request payload for creating a teaching unit (UC).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUnit {
    pub nome: String,
    pub carga_horaria: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docente_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curso_id: Option<Id>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UnitUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carga_horaria: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docente_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curso_id: Option<Id>,
}

/// Request payload for storing a calendar. Events are free-form objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCalendar {
    pub curso_id: Id,
    #[serde(default)]
    pub fases_selecionadas: Vec<i32>,
    pub mes: u32,
    pub ano: i32,
    #[serde(default)]
    pub eventos: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CalendarUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curso_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fases_selecionadas: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ano: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eventos: Option<Vec<serde_json::Value>>,
}

/// Query parameters of calendar generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGeneration {
    pub curso_id: Id,
    pub mes: u32,
    pub ano: i32,
    pub fases_selecionadas: Vec<i32>,
}

impl CalendarGeneration {
    /// Scalars first, then one `fases_selecionadas` pair per phase.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("curso_id", self.curso_id.to_string()),
            ("mes", self.mes.to_string()),
            ("ano", self.ano.to_string()),
        ];
        pairs.extend(
            self.fases_selecionadas
                .iter()
                .map(|fase| ("fases_selecionadas", fase.to_string())),
        );
        pairs
    }
}

/// Request payload for a manual allocation: one instructor teaching one UC
/// in one weekly slot of a given month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAllocation {
    pub uc_id: Id,
    pub docente_id: Id,
    pub dia_semana: u8,
    pub horario_inicio: String,
    pub horario_fim: String,
    /// ISO-8601 timestamp.
    pub data_alocacao: String,
    pub mes: u32,
    pub ano: i32,
    #[serde(default = "active")]
    pub ativa: bool,
}

fn active() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AllocationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uc_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docente_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dia_semana: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horario_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horario_fim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_alocacao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ano: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativa: Option<bool>,
}
