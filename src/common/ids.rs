// src/common/ids.rs

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::common::error::AppError;

// Todo argumento de chave estrangeira chega da API como um identificador
// opaco: ou o inteiro cru ("42"), ou um token base64 que embala "TipoTag:42".
// Este codec é a única porta de entrada de chaves no motor; nada malformado
// ou não-positivo passa daqui para a camada de persistência.

/// Decodifica um identificador opaco para a chave numérica interna.
///
/// Caminho rápido: se `raw` já é um inteiro, ele é retornado sem mudança
/// (decodificar um id já decodificado é idempotente). Caso contrário o token
/// é tratado como base64 de `"TipoTag:chave"` e a parte após o primeiro `:`
/// é convertida. Qualquer outra forma, e qualquer resultado menor que 1,
/// falha com `InvalidIdentifier`.
pub fn decode_id(raw: &str) -> Result<i64, AppError> {
    let raw = raw.trim();

    if let Ok(numeric) = raw.parse::<i64>() {
        return positive_key(numeric, raw);
    }

    let bytes = BASE64
        .decode(raw.as_bytes())
        .map_err(|_| AppError::InvalidIdentifier(raw.to_string()))?;
    let decoded =
        String::from_utf8(bytes).map_err(|_| AppError::InvalidIdentifier(raw.to_string()))?;
    let (_tag, key) = decoded
        .split_once(':')
        .ok_or_else(|| AppError::InvalidIdentifier(raw.to_string()))?;
    let numeric = key
        .parse::<i64>()
        .map_err(|_| AppError::InvalidIdentifier(raw.to_string()))?;

    positive_key(numeric, raw)
}

fn positive_key(numeric: i64, raw: &str) -> Result<i64, AppError> {
    if numeric >= 1 {
        Ok(numeric)
    } else {
        Err(AppError::InvalidIdentifier(raw.to_string()))
    }
}
