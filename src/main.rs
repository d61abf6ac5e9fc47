//! Command-line PDF report renderer.
//!
//! Reads a JSON report description (or falls back to a built-in sample)
//! and writes the rendered PDF.
//!
//! ```text
//! relato [--debug-frames] [--strict] [report.json] [-o out.pdf]
//! ```

use std::process::ExitCode;

use indexmap::IndexMap;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use relato::model::{
    GaugeCardData, GaugeCardGroupData, GaugeCardListData, HeaderData, IconCardData, ListData,
    ReportDocument, ScoreData, ScoreNotValidData, ScoreRangeData, SectionComponent, TableData,
};
use relato::style::palette;
use relato::{render_document, BuildOptions};

struct Args {
    input: Option<String>,
    output: String,
    options: BuildOptions,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        input: None,
        output: "report.pdf".to_string(),
        options: BuildOptions::default(),
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug-frames" => args.options.debug_boundaries = true,
            "--strict" => args.options.strict_overflow = true,
            "-o" | "--output" => {
                args.output = iter
                    .next()
                    .ok_or_else(|| format!("{arg} requires a file path"))?;
            }
            "-h" | "--help" => {
                return Err("usage: relato [--debug-frames] [--strict] [report.json] [-o out.pdf]"
                    .to_string())
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown flag: {other}"));
            }
            other => args.input = Some(other.to_string()),
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let result = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(relato::ReportError::from)
            .and_then(|json| relato::render_json(&json, args.options)),
        None => {
            info!("no input file given, rendering the built-in sample report");
            render_document(sample_report(), args.options)
        }
    };

    match result.and_then(|pdf| {
        let len = pdf.len();
        std::fs::write(&args.output, pdf)?;
        Ok(len)
    }) {
        Ok(len) => {
            info!(path = args.output.as_str(), bytes = len, "report written");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn pairs(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A representative positive credit report.
fn sample_report() -> ReportDocument {
    let header = HeaderData {
        category_name: "Análise de crédito".to_string(),
        product_name: "Relatório positivo".to_string(),
        entity_name: "Comércio Exemplo Ltda".to_string(),
        entity_id: "12.345.678/0001-00".to_string(),
        date_time: "25/08/2026 14:32".to_string(),
        protocol: "2026.0825.4417".to_string(),
        ..Default::default()
    };

    let identification = SectionComponent::List {
        title: "Identificação".to_string(),
        data: ListData {
            fields: pairs(&[
                ("razao_social", "Razão social"),
                ("cnpj", "CNPJ"),
                ("fundacao", "Fundação"),
                ("situacao", "Situação"),
                ("atividade", "Atividade"),
                ("capital", "Capital social"),
            ]),
            items: pairs(&[
                ("razao_social", "Comércio Exemplo Ltda"),
                ("cnpj", "12.345.678/0001-00"),
                ("fundacao", "12/03/2008"),
                ("situacao", "Ativa"),
                ("atividade", "Comércio varejista de mercadorias em geral"),
                ("capital", "R$ 500.000,00"),
            ]),
        },
    };

    let ranges = [
        (400, palette::RED, "Risco muito alto", "Muito alta"),
        (500, palette::RED, "Risco alto", "Alta"),
        (600, palette::ORANGE, "Risco considerável", "Considerável"),
        (700, palette::ORANGE, "Risco médio", "Média"),
        (800, palette::GREEN, "Risco baixo", "Baixa"),
        (900, palette::GREEN, "Risco muito baixo", "Muito baixa"),
        (1000, palette::BLUE, "Risco mínimo", "Mínima"),
    ];
    let score = SectionComponent::Score {
        title: "Score de crédito".to_string(),
        data: ScoreData {
            score: 812,
            min_score: 300,
            aux_title: "Probabilidade de inadimplência".to_string(),
            aux_template: "A probabilidade de inadimplência desta empresa é {}.".to_string(),
            not_valid: ScoreNotValidData {
                color: palette::GRAY,
                aux_template: "Não há informações suficientes para calcular o score."
                    .to_string(),
                description: "Score indisponível".to_string(),
                aux_value: "Indisponível".to_string(),
            },
            ranges: ranges
                .iter()
                .map(|(max_score, color, description, aux_value)| ScoreRangeData {
                    max_score: *max_score,
                    color: *color,
                    description: description.to_string(),
                    aux_value: aux_value.to_string(),
                })
                .collect(),
        },
    };

    let gauges = SectionComponent::GaugeCards {
        title: "Comportamento de mercado".to_string(),
        data: GaugeCardListData {
            groups: vec![GaugeCardGroupData {
                title: "Compromissos".to_string(),
                cards: vec![
                    GaugeCardData {
                        title: "Pontualidade de pagamento".to_string(),
                        description: "Comparada a empresas do mesmo segmento.".to_string(),
                        level: 3,
                        level_text: "Alta".to_string(),
                        color: palette::GREEN,
                    },
                    GaugeCardData {
                        title: "Uso de crédito".to_string(),
                        description: "Volume de crédito tomado nos últimos 12 meses."
                            .to_string(),
                        level: 2,
                        level_text: "Médio".to_string(),
                        color: palette::ORANGE,
                    },
                ],
            }],
        },
    };

    let alerts = SectionComponent::IconCards {
        title: "Alertas e restrições".to_string(),
        cards: vec![
            IconCardData {
                title: "Sem protestos".to_string(),
                description: "Nenhum protesto encontrado nos últimos 5 anos.".to_string(),
                icon: "check".to_string(),
                color: palette::GREEN,
            },
            IconCardData {
                title: "Cheques sem fundo".to_string(),
                description: "1 ocorrência em 24 meses.".to_string(),
                icon: "warning".to_string(),
                color: palette::ORANGE,
            },
            IconCardData {
                title: "Ação judicial".to_string(),
                description: "Execução fiscal em andamento.".to_string(),
                icon: "error".to_string(),
                color: palette::RED,
            },
        ],
    };

    let payments = SectionComponent::Table {
        title: "Histórico de pagamentos".to_string(),
        data: TableData {
            columns: pairs(&[
                ("data", "Data"),
                ("credor", "Credor"),
                ("valor", "Valor"),
                ("situacao", "Situação"),
            ]),
            nested_fields: pairs(&[("observacao", "Observação")]),
            overview: pairs(&[
                ("Total de registros", "36"),
                ("Valor acumulado", "R$ 182.400,00"),
            ]),
            rows: (0..36)
                .map(|i| {
                    let mut row = pairs(&[
                        ("data", &format!("{:02}/{:02}/2026", i % 28 + 1, i % 12 + 1) as &str),
                        ("credor", "Banco Exemplo S.A."),
                        ("valor", &format!("R$ {}.{:02}0,00", 4 + i % 5, i % 10)),
                        ("situacao", if i % 7 == 0 { "Em aberto" } else { "Pago" }),
                    ]);
                    if i % 9 == 0 {
                        row.insert(
                            "observacao".to_string(),
                            "Pagamento renegociado com o credor.".to_string(),
                        );
                    }
                    row
                })
                .collect(),
        },
    };

    ReportDocument {
        header,
        sections: vec![identification, score, gauges, alerts, payments],
    }
}
