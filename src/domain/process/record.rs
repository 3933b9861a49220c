//! Case record types with the court-system wire format.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// A judicial process record submitted for acquisition analysis.
///
/// Field names on the wire follow the court export (`numeroProcesso`,
/// `valorCondenacao`, ...). The record is read-only for the duration of an
/// evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// CNJ process number.
    #[serde(rename = "numeroProcesso")]
    pub number: String,

    /// Procedural class (e.g. "Ação de Cobrança").
    #[serde(rename = "classe")]
    pub class: String,

    /// Court or chamber handling the case.
    #[serde(rename = "orgaoJulgador")]
    pub judging_body: String,

    /// Last distribution date.
    #[serde(rename = "ultimaDistribuicao")]
    pub last_distribution: Timestamp,

    /// Case subject.
    #[serde(rename = "assunto")]
    pub subject: String,

    /// Whether the case is under judicial secrecy.
    #[serde(rename = "segredoJustica")]
    pub under_secrecy: bool,

    /// Whether free legal aid was granted.
    #[serde(rename = "justicaGratuita")]
    pub free_legal_aid: bool,

    /// Court acronym (e.g. "TRF1").
    #[serde(rename = "siglaTribunal")]
    pub court: String,

    /// Jurisdiction sphere (e.g. "cível", "trabalhista").
    #[serde(rename = "esfera")]
    pub sphere: String,

    /// Judgment amount, when the court export carries one.
    #[serde(rename = "valorCondenacao", default)]
    pub judgment_amount: Option<f64>,

    /// Attached documents, in filing order.
    #[serde(rename = "documentos")]
    pub documents: Vec<Document>,

    /// Procedural movements, in chronological order.
    #[serde(rename = "movimentos")]
    pub movements: Vec<Movement>,
}

/// A document attached to the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,

    #[serde(rename = "dataHoraJuntada")]
    pub attached_at: Timestamp,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "texto")]
    pub text: String,
}

/// A procedural movement recorded by the court.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    #[serde(rename = "dataHora")]
    pub occurred_at: Timestamp,

    #[serde(rename = "descricao")]
    pub description: String,
}

impl Process {
    /// Document names, in filing order.
    pub fn document_names(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|d| d.name.as_str())
    }

    /// Movement descriptions, in chronological order.
    pub fn movement_descriptions(&self) -> impl Iterator<Item = &str> {
        self.movements.iter().map(|m| m.description.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "numeroProcesso": "0001111-11.2020.4.01.0000",
            "classe": "Ação de Cobrança",
            "orgaoJulgador": "1ª Vara Federal",
            "ultimaDistribuicao": "2020-01-15T00:00:00",
            "assunto": "Cobrança",
            "segredoJustica": false,
            "justicaGratuita": true,
            "siglaTribunal": "TRF1",
            "esfera": "cível",
            "valorCondenacao": 25000.0,
            "documentos": [{
                "id": "1",
                "dataHoraJuntada": "2024-01-01T12:00:00",
                "nome": "Certidão de Trânsito em Julgado",
                "texto": "Trânsito em julgado certificado."
            }],
            "movimentos": [{
                "dataHora": "2024-02-01T10:00:00",
                "descricao": "Cumprimento definitivo de sentença"
            }]
        })
    }

    #[test]
    fn deserializes_court_export() {
        let process: Process = serde_json::from_value(payload()).unwrap();

        assert_eq!(process.number, "0001111-11.2020.4.01.0000");
        assert_eq!(process.sphere, "cível");
        assert_eq!(process.judgment_amount, Some(25000.0));
        assert_eq!(process.documents.len(), 1);
        assert_eq!(process.documents[0].name, "Certidão de Trânsito em Julgado");
        assert_eq!(
            process.movements[0].description,
            "Cumprimento definitivo de sentença"
        );
    }

    #[test]
    fn judgment_amount_is_optional() {
        let mut value = payload();
        value.as_object_mut().unwrap().remove("valorCondenacao");

        let process: Process = serde_json::from_value(value).unwrap();
        assert!(process.judgment_amount.is_none());
    }

    #[test]
    fn null_judgment_amount_is_accepted() {
        let mut value = payload();
        value["valorCondenacao"] = serde_json::Value::Null;

        let process: Process = serde_json::from_value(value).unwrap();
        assert!(process.judgment_amount.is_none());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let mut value = payload();
        value.as_object_mut().unwrap().remove("esfera");

        assert!(serde_json::from_value::<Process>(value).is_err());
    }

    #[test]
    fn serializes_back_with_wire_names() {
        let process: Process = serde_json::from_value(payload()).unwrap();
        let json = serde_json::to_value(&process).unwrap();

        assert_eq!(json["numeroProcesso"], "0001111-11.2020.4.01.0000");
        assert_eq!(json["documentos"][0]["nome"], "Certidão de Trânsito em Julgado");
    }

    #[test]
    fn iterators_follow_record_order() {
        let process: Process = serde_json::from_value(payload()).unwrap();

        let names: Vec<_> = process.document_names().collect();
        let descriptions: Vec<_> = process.movement_descriptions().collect();

        assert_eq!(names, vec!["Certidão de Trânsito em Julgado"]);
        assert_eq!(descriptions, vec!["Cumprimento definitivo de sentença"]);
    }
}
