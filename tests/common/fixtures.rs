//! Fixture data served by the mock upstream
//!
//! A small, fixed slice of the Statistikbank catalog: two subjects, three
//! tables, and one table with a full variable/value-code definition.

use serde_json::{json, Value};

use super::constants::*;

/// The fixture table's variables with their valid value codes, in order.
pub fn fixture_variables() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (VARIABLE_1_CODE, vec!["000", "0851"]),
        (VARIABLE_2_CODE, vec!["2024K1", "2024K2"]),
    ]
}

pub fn fixture_subjects(lang: &str) -> Vec<Value> {
    let (title_1, title_2) = if lang == "en" {
        (SUBJECT_1_TITLE_EN, "Money and credit market")
    } else {
        (SUBJECT_1_TITLE_DA, "Penge- og kapitalmarked")
    };

    vec![
        json!({
            "id": SUBJECT_1_ID,
            "description": title_1,
            "active": true,
            "hasSubjects": true,
            "subjects": [],
        }),
        json!({
            "id": SUBJECT_2_ID,
            "description": title_2,
            "active": true,
            "hasSubjects": true,
            "subjects": [],
        }),
    ]
}

pub fn fixture_tables(include_inactive: bool, pastdays: Option<u64>) -> Vec<Value> {
    let mut tables = vec![
        json!({
            "id": TABLE_ID,
            "text": "Population at the first day of the quarter",
            "unit": "number",
            "updated": "2024-05-10T08:00:00",
            "firstPeriod": "2008K1",
            "latestPeriod": "2024K2",
            "active": true,
            "variables": [VARIABLE_1_CODE, VARIABLE_2_CODE],
        }),
        json!({
            "id": UPDATED_TODAY_TABLE_ID,
            "text": "Summary vital statistics",
            "unit": "number",
            "updated": "today",
            "firstPeriod": "2006K1",
            "latestPeriod": "2024K2",
            "active": true,
            "variables": ["BEVÆGELSE", VARIABLE_2_CODE],
        }),
    ];

    if include_inactive {
        tables.push(json!({
            "id": INACTIVE_TABLE_ID,
            "text": "Population of Denmark (discontinued)",
            "unit": "number",
            "updated": "2004-03-01T10:00:00",
            "firstPeriod": "1769",
            "latestPeriod": "2004",
            "active": false,
            "variables": [VARIABLE_2_CODE],
        }));
    }

    // pastdays filtering: the mock treats only UPDATED_TODAY_TABLE_ID as
    // recently updated, so any pastdays filter narrows to it
    if pastdays.is_some() {
        tables.retain(|t| t["updated"] == json!("today"));
    }

    tables
}

pub fn fixture_tableinfo() -> Value {
    let variables: Vec<Value> = fixture_variables()
        .into_iter()
        .enumerate()
        .map(|(i, (code, values))| {
            json!({
                "id": code,
                "text": if i == 0 { "region" } else { "time" },
                "elimination": i == 0,
                "time": i == 1,
                "values": values
                    .into_iter()
                    .map(|v| json!({ "id": v, "text": v }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({
        "id": TABLE_ID,
        "text": "Population at the first day of the quarter",
        "description": "Population by region and time",
        "unit": "number",
        "updated": "2024-05-10T08:00:00",
        "active": true,
        "variables": variables,
    })
}
