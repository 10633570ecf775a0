use csv::{ReaderBuilder, StringRecord, Trim};
use std::{fs::File, path::Path};
use tracing::{debug, info, instrument};

use super::records::CsvRecord;
use crate::error::{EtlError, Result};

/// Resolve each of `R::SOURCE_COLUMNS` to its index in `headers`.
fn column_indices<R: CsvRecord>(headers: &StringRecord, file: &Path) -> Result<Vec<usize>> {
    R::SOURCE_COLUMNS
        .iter()
        .map(|&col| {
            headers
                .iter()
                .position(|h| h == col)
                .ok_or_else(|| EtlError::MissingColumn {
                    file: file.to_path_buf(),
                    column: col,
                })
        })
        .collect()
}

/// Parse `dir/R::FILE_NAME` into records, one per data row, in file order.
///
/// Short rows are accepted; absent trailing fields read as empty strings.
#[instrument(level = "info", skip(dir), fields(file = R::FILE_NAME))]
pub fn read_records<R: CsvRecord>(dir: &Path) -> Result<Vec<R>> {
    let path = dir.join(R::FILE_NAME);
    let csv_err = |source| EtlError::Csv {
        file: path.clone(),
        source,
    };

    let file = File::open(&path).map_err(|e| csv_err(csv::Error::from(e)))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(file);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let indices = column_indices::<R>(&headers, &path)?;

    let mut out = Vec::new();
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record).map_err(csv_err)? {
        let fields: Vec<&str> = indices
            .iter()
            .map(|&i| record.get(i).unwrap_or(""))
            .collect();
        out.push(R::from_fields(&fields));

        if out.len() % 100_000 == 0 {
            debug!(rows = out.len(), "parsed");
        }
    }

    info!(rows = out.len(), "parsed CSV");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::records::{Customer, Organization};
    use std::fs;

    const ORG_HEADER: &str = "Index,Organization Id,Name,Website,Country,Description,Founded,Industry,Number of employees\n";

    #[test]
    fn one_record_per_row_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            "{}1,A1,Acme,https://a.com,Chile,\"Widgets, gadgets\",1990,Tools,10\n2,B2,Beta,https://b.com,Peru,Stuff,bad,Food,abc\n3,C3,Gamma,https://c.com,Fiji,More,2001,Arts,7\n",
            ORG_HEADER
        );
        fs::write(dir.path().join("organizations.csv"), body).unwrap();

        let orgs: Vec<Organization> = read_records(dir.path()).unwrap();
        assert_eq!(orgs.len(), 3);
        assert_eq!(orgs[0].organization_id, "A1");
        assert_eq!(orgs[0].description, "Widgets, gadgets");
        assert_eq!(orgs[1].founded, None);
        assert_eq!(orgs[1].number_of_employees, None);
        assert_eq!(orgs[2].name, "Gamma");
        assert_eq!(orgs[2].founded, Some(2001));
    }

    #[test]
    fn short_rows_are_kept_with_blank_fields() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!("{}1,A1,Acme\n", ORG_HEADER);
        fs::write(dir.path().join("organizations.csv"), body).unwrap();

        let orgs: Vec<Organization> = read_records(dir.path()).unwrap();
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].name, "Acme");
        assert_eq!(orgs[0].country, "");
        assert_eq!(orgs[0].founded, None);
    }

    #[test]
    fn missing_header_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("customers.csv"),
            "Customer Id,First Name\nX,Y\n",
        )
        .unwrap();

        let err = read_records::<Customer>(dir.path()).unwrap_err();
        match err {
            EtlError::MissingColumn { column, .. } => assert_eq!(column, "Last Name"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_records::<Customer>(dir.path()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
    }

    #[test]
    fn customers_get_reordered_dates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("customers.csv"),
            "Index,Customer Id,First Name,Last Name,Company,City,Country,Phone 1,Phone 2,Email,Subscription Date,Website\n\
             1,C1,Ann,Lee,Co,Town,Chile,1,2,a@b.c,05-03-2020,http://x\n\
             2,C2,Bob,Ray,Co,Town,Peru,3,4,b@b.c,2020,http://y\n",
        )
        .unwrap();

        let customers: Vec<Customer> = read_records(dir.path()).unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].subscription, "2020-03-05");
        assert_eq!(customers[1].subscription, "undefined-undefined-2020");
    }
}
