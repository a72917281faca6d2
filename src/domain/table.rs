use anyhow::{Context, Result};
use csv::{ReaderBuilder, Writer};

use super::company::{CompanyRecord, EnrichedRecord};

pub const COMPANY_NAME_COLUMN: &str = "company_name";
pub const OUTPUT_FILENAME: &str = "enriched_output.csv";

/// Reads the uploaded CSV. Only the `company_name` column is used, every data
/// row is kept so the output lines up with the input.
pub fn parse_companies(content: &[u8]) -> Result<Vec<CompanyRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let headers = reader
        .headers()
        .context("Failed to read CSV headers")?
        .clone();

    let name_idx = headers
        .iter()
        .position(|h| {
            h.trim_start_matches('\u{feff}')
                .trim()
                .eq_ignore_ascii_case(COMPANY_NAME_COLUMN)
        })
        .with_context(|| format!("CSV must have a '{}' column", COMPANY_NAME_COLUMN))?;

    let mut companies = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to parse CSV row {}", i + 1))?;
        let name = record.get(name_idx).unwrap_or_default();
        companies.push(CompanyRecord::new(name));
    }

    Ok(companies)
}

pub fn write_table(records: &[EnrichedRecord]) -> Result<Vec<u8>> {
    let mut wtr = Writer::from_writer(vec![]);

    // serialize() only emits headers alongside the first row
    if records.is_empty() {
        wtr.write_record([
            COMPANY_NAME_COLUMN,
            "website",
            "industry",
            "summary_from_llm",
            "automation_pitch_from_llm",
        ])?;
    }

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.into_inner().context("Failed to flush CSV writer")
}

#[cfg(test)]
mod tests {
    use super::{parse_companies, write_table};
    use crate::domain::company::EnrichedRecord;

    #[test]
    fn parse_ignores_other_columns() {
        let content = b"id,company_name,notes\n1,Acme Corp,hot lead\n2,Ghost LLC,\n";
        let companies = parse_companies(content).unwrap();

        let names: Vec<&str> = companies.iter().map(|c| c.company_name.as_str()).collect();
        assert_eq!(names, vec!["Acme Corp", "Ghost LLC"]);
    }

    #[test]
    fn parse_keeps_blank_rows_in_order() {
        let content = b"company_name,city\nAcme Corp,Paris\n,Berlin\n\"Widgets, Inc\",Rome\n";
        let companies = parse_companies(content).unwrap();

        let names: Vec<&str> = companies.iter().map(|c| c.company_name.as_str()).collect();
        assert_eq!(names, vec!["Acme Corp", "", "Widgets, Inc"]);
    }

    #[test]
    fn parse_matches_header_loosely() {
        let content = "\u{feff} Company_Name \nAcme Corp\n".as_bytes();
        let companies = parse_companies(content).unwrap();

        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].company_name, "Acme Corp");
    }

    #[test]
    fn parse_without_company_column_fails() {
        let err = parse_companies(b"name\nAcme Corp\n").unwrap_err();
        assert!(err.to_string().contains("company_name"));
    }

    #[test]
    fn parse_header_only() {
        assert!(parse_companies(b"company_name\n").unwrap().is_empty());
    }

    #[test]
    fn write_empty_table_keeps_header() {
        let bytes = write_table(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "company_name,website,industry,summary_from_llm,automation_pitch_from_llm\n"
        );
    }

    #[test]
    fn write_quotes_fields_with_commas() {
        let records = vec![
            EnrichedRecord {
                company_name: "Acme Corp".to_string(),
                website: "acme.com".to_string(),
                industry: "Software".to_string(),
                summary_from_llm: "Widgets, gadgets".to_string(),
                automation_pitch_from_llm: "Automate widget QA".to_string(),
            },
            EnrichedRecord {
                company_name: "Ghost LLC".to_string(),
                ..Default::default()
            },
        ];
        let csv = String::from_utf8(write_table(&records).unwrap()).unwrap();

        assert_eq!(
            csv,
            "company_name,website,industry,summary_from_llm,automation_pitch_from_llm\n\
             Acme Corp,acme.com,Software,\"Widgets, gadgets\",Automate widget QA\n\
             Ghost LLC,,,,\n"
        );
    }
}
