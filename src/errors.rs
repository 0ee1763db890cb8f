use thiserror::Error;

use crate::parsers::csv::ColumnRole;

/// Erros possíveis durante a extração e categorização de extratos
#[derive(Error, Debug)]
pub enum StatementParseError {
    /// Tipo do documento não identificado como PDF (texto) nem CSV
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// Cabeçalho CSV sem coluna de data, descrição ou valor reconhecível
    #[error("Unrecognized CSV format: missing {} column(s)", join_roles(.missing))]
    UnrecognizedFormat { missing: Vec<ColumnRole> },

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// O builder foi chamado sem fornecer conteúdo nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// Falha do leitor/escritor CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Falha ao ler ou gerar JSON (regras de categoria, exportação)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regra de categoria inválida (palavra-chave vazia)
    #[error("Invalid category rule: {0}")]
    InvalidRule(String),

    // ── Erros por registro (a linha é descartada, o import continua) ─────────

    /// Data em nenhum dos formatos conhecidos
    #[error("Unparseable date: {0:?}")]
    UnparseableDate(String),

    /// Valor que não é decimal mesmo após remover `$` e `,`
    #[error("Invalid amount: {0:?}")]
    NumberFormat(String),

    /// Linha CSV mais curta que a coluna esperada
    #[error("Missing {role} field")]
    MissingField { role: ColumnRole },

    /// Valor que estouraria os totais do extrato ao ser somado
    #[error("Amount {0} overflows the statement totals")]
    AmountOverflow(String),
}

impl StatementParseError {
    /// Erros que afetam apenas um registro; o chamador descarta a linha e segue
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            Self::UnparseableDate(_)
                | Self::NumberFormat(_)
                | Self::MissingField { .. }
                | Self::AmountOverflow(_)
        )
    }
}

fn join_roles(roles: &[ColumnRole]) -> String {
    roles
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type StatementResult<T> = Result<T, StatementParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatementParseError::UnparseableDate("13/45/2024".into()), true)]
    #[case(StatementParseError::NumberFormat("abc".into()), true)]
    #[case(StatementParseError::MissingField { role: ColumnRole::Date }, true)]
    #[case(StatementParseError::AmountOverflow("-79228162514264337593543950335".into()), true)]
    #[case(StatementParseError::UnsupportedFormat, false)]
    #[case(StatementParseError::UnrecognizedFormat { missing: vec![ColumnRole::Amount] }, false)]
    #[case(StatementParseError::MissingContentAndFilepath, false)]
    fn test_is_record_level(#[case] err: StatementParseError, #[case] expected: bool) {
        assert_eq!(err.is_record_level(), expected);
    }

    #[test]
    fn test_unrecognized_format_lists_missing_roles() {
        let err = StatementParseError::UnrecognizedFormat {
            missing: vec![ColumnRole::Description, ColumnRole::Amount],
        };
        assert_eq!(
            err.to_string(),
            "Unrecognized CSV format: missing description, amount column(s)"
        );
    }
}
