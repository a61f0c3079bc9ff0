use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::atividade::{Atividade, Categoria, NovaAtividade, Status};

/// Filter intent for listing activities. At most one field is honored per
/// request; `Todas` is both "no filter" and the fallback when more than one
/// filter parameter arrives (original API behavior).
#[derive(Debug, Clone, PartialEq)]
pub enum Filtro {
    Todas,
    Titulo(String),
    Categoria(Categoria),
    Status(Status),
    Prioridade(i32),
    Data(NaiveDate),
}

const COLUNAS: &str = "id, titulo, imagem, descricao, local_url, data, hora_inicio, hora_fim, \
                       custo_estimado, categoria, prioridade, status";

pub async fn create(pool: &PgPool, nova: &NovaAtividade) -> Result<Atividade, sqlx::Error> {
    let sql = format!(
        "INSERT INTO atividades (titulo, imagem, descricao, local_url, data, hora_inicio, \
         hora_fim, custo_estimado, categoria, prioridade, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {COLUNAS}"
    );
    sqlx::query_as::<_, Atividade>(&sql)
        .bind(&nova.titulo)
        .bind(&nova.imagem)
        .bind(&nova.descricao)
        .bind(&nova.local_url)
        .bind(nova.data)
        .bind(nova.hora_inicio)
        .bind(nova.hora_fim)
        .bind(nova.custo_estimado)
        .bind(nova.categoria)
        .bind(nova.prioridade)
        .bind(Status::Pendente)
        .fetch_one(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Atividade>, sqlx::Error> {
    let sql = format!("SELECT {COLUNAS} FROM atividades WHERE id = $1");
    sqlx::query_as::<_, Atividade>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_all(pool: &PgPool) -> Result<Vec<Atividade>, sqlx::Error> {
    let sql = format!("SELECT {COLUNAS} FROM atividades ORDER BY id");
    sqlx::query_as::<_, Atividade>(&sql).fetch_all(pool).await
}

// Case-sensitive substring match, same as the store's LIKE.
pub async fn find_by_titulo_containing(
    pool: &PgPool,
    titulo: &str,
) -> Result<Vec<Atividade>, sqlx::Error> {
    let sql = format!(
        "SELECT {COLUNAS} FROM atividades WHERE titulo LIKE '%' || $1 || '%' ORDER BY id"
    );
    sqlx::query_as::<_, Atividade>(&sql)
        .bind(titulo)
        .fetch_all(pool)
        .await
}

pub async fn find_by_categoria(
    pool: &PgPool,
    categoria: Categoria,
) -> Result<Vec<Atividade>, sqlx::Error> {
    let sql = format!("SELECT {COLUNAS} FROM atividades WHERE categoria = $1 ORDER BY id");
    sqlx::query_as::<_, Atividade>(&sql)
        .bind(categoria)
        .fetch_all(pool)
        .await
}

pub async fn find_by_status(pool: &PgPool, status: Status) -> Result<Vec<Atividade>, sqlx::Error> {
    let sql = format!("SELECT {COLUNAS} FROM atividades WHERE status = $1 ORDER BY id");
    sqlx::query_as::<_, Atividade>(&sql)
        .bind(status)
        .fetch_all(pool)
        .await
}

pub async fn find_by_prioridade(
    pool: &PgPool,
    prioridade: i32,
) -> Result<Vec<Atividade>, sqlx::Error> {
    let sql = format!("SELECT {COLUNAS} FROM atividades WHERE prioridade = $1 ORDER BY id");
    sqlx::query_as::<_, Atividade>(&sql)
        .bind(prioridade)
        .fetch_all(pool)
        .await
}

pub async fn find_by_data(pool: &PgPool, data: NaiveDate) -> Result<Vec<Atividade>, sqlx::Error> {
    let sql = format!("SELECT {COLUNAS} FROM atividades WHERE data = $1 ORDER BY id");
    sqlx::query_as::<_, Atividade>(&sql)
        .bind(data)
        .fetch_all(pool)
        .await
}

pub async fn find_by_filtro(pool: &PgPool, filtro: &Filtro) -> Result<Vec<Atividade>, sqlx::Error> {
    match filtro {
        Filtro::Todas => find_all(pool).await,
        Filtro::Titulo(titulo) => find_by_titulo_containing(pool, titulo).await,
        Filtro::Categoria(categoria) => find_by_categoria(pool, *categoria).await,
        Filtro::Status(status) => find_by_status(pool, *status).await,
        Filtro::Prioridade(prioridade) => find_by_prioridade(pool, *prioridade).await,
        Filtro::Data(data) => find_by_data(pool, *data).await,
    }
}

/// Full replace of every mutable field; `id` and `status` are untouched.
/// Returns None when the id does not exist. Single statement, so concurrent
/// updates to the same id serialize at the store instead of racing in a
/// read-then-write window.
pub async fn update(
    pool: &PgPool,
    id: i64,
    nova: &NovaAtividade,
) -> Result<Option<Atividade>, sqlx::Error> {
    let sql = format!(
        "UPDATE atividades SET titulo = $1, imagem = $2, descricao = $3, local_url = $4, \
         data = $5, hora_inicio = $6, hora_fim = $7, custo_estimado = $8, categoria = $9, \
         prioridade = $10 WHERE id = $11 RETURNING {COLUNAS}"
    );
    sqlx::query_as::<_, Atividade>(&sql)
        .bind(&nova.titulo)
        .bind(&nova.imagem)
        .bind(&nova.descricao)
        .bind(&nova.local_url)
        .bind(nova.data)
        .bind(nova.hora_inicio)
        .bind(nova.hora_fim)
        .bind(nova.custo_estimado)
        .bind(nova.categoria)
        .bind(nova.prioridade)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Sets the lifecycle status unconditionally (re-applying the same status is
/// allowed and idempotent). Returns None when the id does not exist.
pub async fn set_status(
    pool: &PgPool,
    id: i64,
    status: Status,
) -> Result<Option<Atividade>, sqlx::Error> {
    let sql = format!("UPDATE atividades SET status = $1 WHERE id = $2 RETURNING {COLUNAS}");
    sqlx::query_as::<_, Atividade>(&sql)
        .bind(status)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Returns true when a row was actually removed.
pub async fn delete_by_id(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM atividades WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
