use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Closed set of activity categories. Stored as their uppercase labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "VARCHAR", rename_all = "UPPERCASE")]
pub enum Categoria {
    Alimentacao,
    Passeio,
    Lazer,
    Hospedagem,
    Transporte,
    Compras,
    Outro,
}

/// Lifecycle state of an activity. New records always start as PENDENTE;
/// the two PATCH actions move it to CONCLUIDA or CANCELADA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "VARCHAR", rename_all = "UPPERCASE")]
pub enum Status {
    Pendente,
    Concluida,
    Cancelada,
}

/// A persisted activity, as stored in the `atividades` table and returned
/// on the wire (camelCase keys, ISO-8601 dates/times).
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Atividade {
    pub id: i64,
    pub titulo: String,
    pub imagem: Option<String>,
    pub descricao: String,
    pub local_url: Option<String>,
    pub data: NaiveDate,
    pub hora_inicio: Option<NaiveTime>,
    pub hora_fim: Option<NaiveTime>,
    pub custo_estimado: Option<Decimal>,
    pub categoria: Categoria,
    pub prioridade: i32,
    pub status: Status,
}

/// The writable fields of an activity: everything except `id` (assigned by
/// the store) and `status` (controlled by the server).
#[derive(Debug, Clone)]
pub struct NovaAtividade {
    pub titulo: String,
    pub imagem: Option<String>,
    pub descricao: String,
    pub local_url: Option<String>,
    pub data: NaiveDate,
    pub hora_inicio: Option<NaiveTime>,
    pub hora_fim: Option<NaiveTime>,
    pub custo_estimado: Option<Decimal>,
    pub categoria: Categoria,
    pub prioridade: i32,
}
