use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use validator::ValidationError;

// NotBlank semantics: present but whitespace-only is still invalid.
pub fn nao_em_branco(valor: &str) -> Result<(), ValidationError> {
    if valor.trim().is_empty() {
        return Err(ValidationError::new("nao_em_branco"));
    }
    Ok(())
}

// The activity date must be today or later, evaluated against the server's
// local date at validation time.
pub fn data_nao_passada(data: &NaiveDate) -> Result<(), ValidationError> {
    if *data < Local::now().date_naive() {
        return Err(ValidationError::new("data_no_passado"));
    }
    Ok(())
}

// Estimated cost: non-negative, at most 8 integer digits and 2 fraction
// digits (NUMERIC(10,2) in the schema).
pub fn custo_estimado_valido(custo: &Decimal) -> Result<(), ValidationError> {
    if custo.is_sign_negative() {
        return Err(ValidationError::new("custo_negativo"));
    }
    if custo.normalize().scale() > 2 {
        return Err(ValidationError::new("custo_casas_decimais"));
    }
    let limite = Decimal::new(100_000_000, 0);
    if custo.trunc() >= limite {
        return Err(ValidationError::new("custo_digitos_inteiros"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn custo(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn branco_e_rejeitado() {
        assert!(nao_em_branco("").is_err());
        assert!(nao_em_branco("   ").is_err());
        assert!(nao_em_branco("\t\n").is_err());
        assert!(nao_em_branco("museu").is_ok());
    }

    #[test]
    fn data_de_hoje_e_aceita() {
        let hoje = Local::now().date_naive();
        assert!(data_nao_passada(&hoje).is_ok());
    }

    #[test]
    fn data_futura_e_aceita() {
        let amanha = Local::now().date_naive() + Duration::days(1);
        assert!(data_nao_passada(&amanha).is_ok());
    }

    #[test]
    fn data_passada_e_rejeitada() {
        let ontem = Local::now().date_naive() - Duration::days(1);
        assert!(data_nao_passada(&ontem).is_err());
    }

    #[test]
    fn custo_negativo_e_rejeitado() {
        assert!(custo_estimado_valido(&custo("-0.01")).is_err());
        assert!(custo_estimado_valido(&custo("0")).is_ok());
    }

    #[test]
    fn custo_respeita_oito_digitos_inteiros() {
        assert!(custo_estimado_valido(&custo("12345678.12")).is_ok());
        assert!(custo_estimado_valido(&custo("99999999.99")).is_ok());
        assert!(custo_estimado_valido(&custo("123456789.12")).is_err());
        assert!(custo_estimado_valido(&custo("100000000")).is_err());
    }

    #[test]
    fn custo_respeita_duas_casas_decimais() {
        assert!(custo_estimado_valido(&custo("10.5")).is_ok());
        assert!(custo_estimado_valido(&custo("10.55")).is_ok());
        assert!(custo_estimado_valido(&custo("10.555")).is_err());
        // trailing zeros do not count as extra precision
        assert!(custo_estimado_valido(&custo("10.500")).is_ok());
    }
}
