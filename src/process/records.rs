// src/process/records.rs

use rusqlite::types::Value;

use super::date_parser::{format_date, parse_int};
use crate::load::{integer, text, Column, TableRecord};

/// A record built from one CSV row.
/// - `FILE_NAME` is the CSV it is read from.
/// - `SOURCE_COLUMNS` lists the headers it needs, in the order handed to
///   `from_fields`.
pub trait CsvRecord: Sized {
    const FILE_NAME: &'static str;
    const SOURCE_COLUMNS: &'static [&'static str];
    fn from_fields(fields: &[&str]) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub organization_id: String,
    pub name: String,
    pub website: String,
    pub country: String,
    pub description: String,
    pub founded: Option<i64>,
    pub industry: String,
    pub number_of_employees: Option<i64>,
}

impl CsvRecord for Organization {
    const FILE_NAME: &'static str = "organizations.csv";
    const SOURCE_COLUMNS: &'static [&'static str] = &[
        "Organization Id",
        "Name",
        "Website",
        "Country",
        "Description",
        "Founded",
        "Industry",
        "Number of employees",
    ];

    fn from_fields(f: &[&str]) -> Self {
        Self {
            organization_id: f[0].to_string(),
            name: f[1].to_string(),
            website: f[2].to_string(),
            country: f[3].to_string(),
            description: f[4].to_string(),
            founded: parse_int(f[5]),
            industry: f[6].to_string(),
            number_of_employees: parse_int(f[7]),
        }
    }
}

impl TableRecord for Organization {
    const TABLE: &'static str = "organizations";
    const COLUMNS: &'static [Column] = &[
        Column::new("OrganizationId", "VARCHAR(255)"),
        Column::new("Name", "VARCHAR(255)"),
        Column::new("Website", "VARCHAR(255)"),
        Column::new("Country", "VARCHAR(255)"),
        Column::new("Description", "VARCHAR(255)"),
        Column::new("Founded", "INTEGER"),
        Column::new("Industry", "VARCHAR(255)"),
        Column::new("NumberOfEmployees", "INTEGER"),
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(&self.organization_id),
            text(&self.name),
            text(&self.website),
            text(&self.country),
            text(&self.description),
            integer(self.founded),
            text(&self.industry),
            integer(self.number_of_employees),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub city: String,
    pub country: String,
    pub phone1: String,
    pub phone2: String,
    pub email: String,
    /// `YYYY-MM-DD`, reordered from the source `DD-MM-YYYY`.
    pub subscription: String,
    pub website: String,
}

impl CsvRecord for Customer {
    const FILE_NAME: &'static str = "customers.csv";
    const SOURCE_COLUMNS: &'static [&'static str] = &[
        "Customer Id",
        "First Name",
        "Last Name",
        "Company",
        "City",
        "Country",
        "Phone 1",
        "Phone 2",
        "Email",
        "Subscription Date",
        "Website",
    ];

    fn from_fields(f: &[&str]) -> Self {
        Self {
            customer_id: f[0].to_string(),
            first_name: f[1].to_string(),
            last_name: f[2].to_string(),
            company: f[3].to_string(),
            city: f[4].to_string(),
            country: f[5].to_string(),
            phone1: f[6].to_string(),
            phone2: f[7].to_string(),
            email: f[8].to_string(),
            subscription: format_date(f[9]),
            website: f[10].to_string(),
        }
    }
}

impl TableRecord for Customer {
    const TABLE: &'static str = "customers";
    const COLUMNS: &'static [Column] = &[
        Column::new("CustomerId", "VARCHAR(255)"),
        Column::new("FirstName", "VARCHAR(255)"),
        Column::new("LastName", "VARCHAR(255)"),
        Column::new("Company", "VARCHAR(255)"),
        Column::new("City", "VARCHAR(255)"),
        Column::new("Country", "VARCHAR(255)"),
        Column::new("Phone1", "VARCHAR(255)"),
        Column::new("Phone2", "VARCHAR(255)"),
        Column::new("Email", "VARCHAR(255)"),
        Column::new("Subscription", "TEXT"),
        Column::new("Website", "VARCHAR(255)"),
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(&self.customer_id),
            text(&self.first_name),
            text(&self.last_name),
            text(&self.company),
            text(&self.city),
            text(&self.country),
            text(&self.phone1),
            text(&self.phone2),
            text(&self.email),
            text(&self.subscription),
            text(&self.website),
        ]
    }
}
