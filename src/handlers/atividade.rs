use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::errors::ApiError;
use crate::models::atividade::{Categoria, NovaAtividade, Status};
use crate::repository::{self, Filtro};
use crate::utils::validation::{custo_estimado_valido, data_nao_passada, nao_em_branco};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AtividadePayload {
    #[validate(required(message = "O nome da atividade não pode ser vazio"))]
    #[validate(custom(function = "nao_em_branco", message = "O nome da atividade não pode ser vazio"))]
    #[validate(length(max = 100, message = "O título não pode ultrapassar 100 caracteres"))]
    titulo: Option<String>,

    #[validate(url(message = "A imagem deve ser uma URL válida"))]
    imagem: Option<String>,

    #[validate(required(message = "A descrição não pode ser vazia"))]
    #[validate(custom(function = "nao_em_branco", message = "A descrição não pode ser vazia"))]
    #[validate(length(max = 500, message = "O tamanho da descrição não pode ultrapassar 500 caracteres"))]
    descricao: Option<String>,

    #[validate(url(message = "O local deve ser uma URL válida"))]
    local_url: Option<String>,

    #[validate(required(message = "A data da atividade não pode ser vazia"))]
    #[validate(custom(function = "data_nao_passada", message = "A data não pode estar no passado"))]
    data: Option<NaiveDate>,

    hora_inicio: Option<NaiveTime>,
    hora_fim: Option<NaiveTime>,

    #[validate(custom(
        function = "custo_estimado_valido",
        message = "O valor deve seguir o formato estabelecido com 2 casas decimais"
    ))]
    custo_estimado: Option<Decimal>,

    #[validate(required(message = "A categoria não pode ser vazia"))]
    categoria: Option<Categoria>,

    #[validate(required(message = "A prioridade não pode ser vazia"))]
    #[validate(range(min = 1, max = 5, message = "A prioridade deve estar entre 1 e 5"))]
    prioridade: Option<i32>,
}

impl AtividadePayload {
    // Only called after validate(); the required fields are known to be Some.
    fn into_nova(self) -> NovaAtividade {
        NovaAtividade {
            titulo: self.titulo.unwrap(),
            imagem: self.imagem,
            descricao: self.descricao.unwrap(),
            local_url: self.local_url,
            data: self.data.unwrap(),
            hora_inicio: self.hora_inicio,
            hora_fim: self.hora_fim,
            custo_estimado: self.custo_estimado,
            categoria: self.categoria.unwrap(),
            prioridade: self.prioridade.unwrap(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AtividadeFiltroQuery {
    titulo: Option<String>,
    categoria: Option<Categoria>,
    status: Option<Status>,
    prioridade: Option<i32>,
    data: Option<NaiveDate>,
}

impl AtividadeFiltroQuery {
    // Exactly one parameter selects its filter; zero or more than one falls
    // back to listing everything, matching the original API.
    fn into_filtro(self) -> Filtro {
        let presentes = [
            self.titulo.is_some(),
            self.categoria.is_some(),
            self.status.is_some(),
            self.prioridade.is_some(),
            self.data.is_some(),
        ]
        .iter()
        .filter(|&&p| p)
        .count();

        if presentes != 1 {
            return Filtro::Todas;
        }

        if let Some(titulo) = self.titulo {
            Filtro::Titulo(titulo)
        } else if let Some(categoria) = self.categoria {
            Filtro::Categoria(categoria)
        } else if let Some(status) = self.status {
            Filtro::Status(status)
        } else if let Some(prioridade) = self.prioridade {
            Filtro::Prioridade(prioridade)
        } else if let Some(data) = self.data {
            Filtro::Data(data)
        } else {
            Filtro::Todas
        }
    }
}

// POST /
pub async fn create_atividade(
    pool: web::Data<sqlx::PgPool>,
    payload: web::Json<AtividadePayload>,
) -> Result<HttpResponse, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let atividade = repository::create(&pool, &payload.into_inner().into_nova()).await?;
    Ok(HttpResponse::Created().json(atividade))
}

// GET /{id}
pub async fn get_atividade_by_id(
    pool: web::Data<sqlx::PgPool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    match repository::find_by_id(&pool, *id).await? {
        Some(atividade) => Ok(HttpResponse::Ok().json(atividade)),
        None => Err(ApiError::NotFound),
    }
}

// GET /
pub async fn get_all_atividades(
    pool: web::Data<sqlx::PgPool>,
    query: web::Query<AtividadeFiltroQuery>,
) -> Result<HttpResponse, ApiError> {
    let atividades = repository::find_by_filtro(&pool, &query.into_inner().into_filtro()).await?;

    if atividades.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }
    Ok(HttpResponse::Ok().json(atividades))
}

// PUT /{id}
pub async fn update_atividade(
    pool: web::Data<sqlx::PgPool>,
    id: web::Path<i64>,
    payload: web::Json<AtividadePayload>,
) -> Result<HttpResponse, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    match repository::update(&pool, *id, &payload.into_inner().into_nova()).await? {
        Some(atividade) => Ok(HttpResponse::Ok().json(atividade)),
        None => Err(ApiError::NotFound),
    }
}

// DELETE /{id}
pub async fn delete_atividade(
    pool: web::Data<sqlx::PgPool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    if repository::delete_by_id(&pool, *id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::NotFound)
    }
}

// PATCH /{id}/concluir
pub async fn concluir_atividade(
    pool: web::Data<sqlx::PgPool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    match repository::set_status(&pool, *id, Status::Concluida).await? {
        Some(atividade) => Ok(HttpResponse::Ok().json(atividade)),
        None => Err(ApiError::NotFound),
    }
}

// PATCH /{id}/cancelar
pub async fn cancelar_atividade(
    pool: web::Data<sqlx::PgPool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    match repository::set_status(&pool, *id, Status::Cancelada).await? {
        Some(atividade) => Ok(HttpResponse::Ok().json(atividade)),
        None => Err(ApiError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(corpo: serde_json::Value) -> AtividadePayload {
        serde_json::from_value(corpo).unwrap()
    }

    fn payload_valido() -> serde_json::Value {
        json!({
            "titulo": "Visitar museu",
            "descricao": "Ver a exposição",
            "data": "2099-01-01",
            "categoria": "LAZER",
            "prioridade": 3
        })
    }

    #[test]
    fn payload_completo_e_valido() {
        let mut corpo = payload_valido();
        corpo["imagem"] = json!("https://example.com/foto.jpg");
        corpo["localUrl"] = json!("https://maps.example.com/museu");
        corpo["horaInicio"] = json!("09:00:00");
        corpo["horaFim"] = json!("11:30:00");
        corpo["custoEstimado"] = json!(12345678.12);
        assert!(payload(corpo).validate().is_ok());
    }

    #[test]
    fn payload_minimo_e_valido() {
        assert!(payload(payload_valido()).validate().is_ok());
    }

    #[test]
    fn titulo_com_101_caracteres_e_rejeitado() {
        let mut corpo = payload_valido();
        corpo["titulo"] = json!("a".repeat(101));
        let erros = payload(corpo).validate().unwrap_err();
        assert!(erros.field_errors().contains_key("titulo"));
    }

    #[test]
    fn titulo_em_branco_e_rejeitado() {
        let mut corpo = payload_valido();
        corpo["titulo"] = json!("   ");
        assert!(payload(corpo).validate().is_err());
    }

    #[test]
    fn descricao_ausente_e_rejeitada() {
        let mut corpo = payload_valido();
        corpo.as_object_mut().unwrap().remove("descricao");
        let erros = payload(corpo).validate().unwrap_err();
        assert!(erros.field_errors().contains_key("descricao"));
    }

    #[test]
    fn descricao_com_501_caracteres_e_rejeitada() {
        let mut corpo = payload_valido();
        corpo["descricao"] = json!("d".repeat(501));
        assert!(payload(corpo).validate().is_err());
    }

    #[test]
    fn prioridade_fora_do_intervalo_e_rejeitada() {
        for prioridade in [0, 6] {
            let mut corpo = payload_valido();
            corpo["prioridade"] = json!(prioridade);
            let erros = payload(corpo).validate().unwrap_err();
            assert!(erros.field_errors().contains_key("prioridade"));
        }
        for prioridade in 1..=5 {
            let mut corpo = payload_valido();
            corpo["prioridade"] = json!(prioridade);
            assert!(payload(corpo).validate().is_ok());
        }
    }

    #[test]
    fn data_no_passado_e_rejeitada() {
        let mut corpo = payload_valido();
        corpo["data"] = json!("2000-01-01");
        let erros = payload(corpo).validate().unwrap_err();
        assert!(erros.field_errors().contains_key("data"));
    }

    #[test]
    fn data_de_hoje_e_aceita() {
        let mut corpo = payload_valido();
        corpo["data"] = json!(chrono::Local::now().date_naive().to_string());
        assert!(payload(corpo).validate().is_ok());
    }

    #[test]
    fn url_invalida_e_rejeitada() {
        let mut corpo = payload_valido();
        corpo["imagem"] = json!("nao-e-uma-url");
        let erros = payload(corpo).validate().unwrap_err();
        assert!(erros.field_errors().contains_key("imagem"));
    }

    #[test]
    fn custo_com_nove_digitos_inteiros_e_rejeitado() {
        let mut corpo = payload_valido();
        corpo["custoEstimado"] = json!(123456789.12);
        let erros = payload(corpo).validate().unwrap_err();
        assert!(erros.field_errors().contains_key("custo_estimado"));
    }

    #[test]
    fn status_no_corpo_e_ignorado() {
        let mut corpo = payload_valido();
        corpo["status"] = json!("CONCLUIDA");
        // desconhecido para o payload; o servidor sempre grava PENDENTE
        assert!(payload(corpo).validate().is_ok());
    }

    #[test]
    fn into_nova_preserva_os_campos() {
        let nova = payload(payload_valido()).into_nova();
        assert_eq!(nova.titulo, "Visitar museu");
        assert_eq!(nova.categoria, Categoria::Lazer);
        assert_eq!(nova.prioridade, 3);
        assert!(nova.custo_estimado.is_none());
    }

    fn filtro(query: serde_json::Value) -> Filtro {
        serde_json::from_value::<AtividadeFiltroQuery>(query)
            .unwrap()
            .into_filtro()
    }

    #[test]
    fn sem_parametros_lista_todas() {
        assert_eq!(filtro(json!({})), Filtro::Todas);
    }

    #[test]
    fn um_parametro_seleciona_o_filtro() {
        assert_eq!(
            filtro(json!({ "titulo": "museu" })),
            Filtro::Titulo("museu".to_string())
        );
        assert_eq!(
            filtro(json!({ "categoria": "LAZER" })),
            Filtro::Categoria(Categoria::Lazer)
        );
        assert_eq!(
            filtro(json!({ "status": "PENDENTE" })),
            Filtro::Status(Status::Pendente)
        );
        assert_eq!(filtro(json!({ "prioridade": 2 })), Filtro::Prioridade(2));
        assert_eq!(
            filtro(json!({ "data": "2099-01-01" })),
            Filtro::Data(chrono::NaiveDate::from_ymd_opt(2099, 1, 1).unwrap())
        );
    }

    #[test]
    fn mais_de_um_parametro_cai_para_todas() {
        assert_eq!(
            filtro(json!({ "titulo": "museu", "prioridade": 2 })),
            Filtro::Todas
        );
        assert_eq!(
            filtro(json!({ "categoria": "LAZER", "status": "PENDENTE", "prioridade": 1 })),
            Filtro::Todas
        );
    }
}
