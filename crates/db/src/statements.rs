//! Named SQL statements.
//!
//! Repositories never embed SQL: every round trip goes through one of the
//! statements below, looked up by name.  The defaults target PostgreSQL; a
//! TOML file may override any subset of them:
//!
//! ```toml
//! select-person = "SELECT ID, FIRSTNAME, LASTNAME, AGE, GENDER, ADDRESS_ID FROM APP.PERSON WHERE ID = $1"
//! next-person-id = "SELECT nextval('APP.SEQ_ID_PERSON')"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::Sequence;

#[derive(Debug, Error)]
pub enum StatementsError {
    #[error("cannot read statements file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid statements file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot render statements: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Statements {
    /// `$1` = address id.
    pub select_address: String,
    /// `$1..$4` = id, street, zip code, city.
    pub insert_address: String,
    pub select_all_person: String,
    /// `$1` = person id.
    pub select_person: String,
    /// `$1` = first name, exact match.
    pub select_all_person_firstname: String,
    /// `$1..$6` = id, first name, last name, age, gender, address id.
    pub insert_person: String,
    /// Single `BIGINT` column.
    pub next_address_id: String,
    /// Single `BIGINT` column.
    pub next_person_id: String,
}

impl Default for Statements {
    fn default() -> Self {
        Self {
            select_address: "SELECT ID, STREET, ZIPCODE, CITY FROM ADDRESS WHERE ID = $1".into(),
            insert_address: "INSERT INTO ADDRESS (ID, STREET, ZIPCODE, CITY) VALUES ($1, $2, $3, $4)"
                .into(),
            select_all_person: "SELECT ID, FIRSTNAME, LASTNAME, AGE, GENDER, ADDRESS_ID FROM PERSON"
                .into(),
            select_person:
                "SELECT ID, FIRSTNAME, LASTNAME, AGE, GENDER, ADDRESS_ID FROM PERSON WHERE ID = $1"
                    .into(),
            select_all_person_firstname:
                "SELECT ID, FIRSTNAME, LASTNAME, AGE, GENDER, ADDRESS_ID FROM PERSON WHERE FIRSTNAME = $1"
                    .into(),
            insert_person: "INSERT INTO PERSON (ID, FIRSTNAME, LASTNAME, AGE, GENDER, ADDRESS_ID) \
                            VALUES ($1, $2, $3, $4, $5, $6)"
                .into(),
            next_address_id: "SELECT nextval('SEQ_ID_ADDRESS')".into(),
            next_person_id: "SELECT nextval('SEQ_ID_PERSON')".into(),
        }
    }
}

impl Statements {
    /// Parse overrides; keys left out keep their default text.
    pub fn from_toml_str(source: &str) -> Result<Self, StatementsError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StatementsError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| StatementsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String, StatementsError> {
        Ok(toml::to_string(self)?)
    }

    /// Counter-advance query for `sequence`.
    pub fn next_val(&self, sequence: Sequence) -> &str {
        match sequence {
            Sequence::Address => &self.next_address_id,
            Sequence::Person => &self.next_person_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let statements = Statements::from_toml_str(
            r#"select-person = "SELECT * FROM APP.PERSON WHERE ID = $1""#,
        )
        .unwrap();
        assert_eq!(statements.select_person, "SELECT * FROM APP.PERSON WHERE ID = $1");
        assert_eq!(statements.select_address, Statements::default().select_address);
    }

    #[test]
    fn unknown_statement_names_are_rejected() {
        let err = Statements::from_toml_str(r#"delete-person = "DELETE FROM PERSON""#).unwrap_err();
        assert!(matches!(err, StatementsError::Parse(_)));
    }

    #[test]
    fn rendered_toml_parses_back() {
        let rendered = Statements::default().to_toml_string().unwrap();
        assert!(rendered.contains("select-all-person-firstname"));
        assert_eq!(Statements::from_toml_str(&rendered).unwrap(), Statements::default());
    }

    #[test]
    fn next_val_picks_the_sequence_query() {
        let statements = Statements::default();
        assert!(statements.next_val(Sequence::Address).contains("SEQ_ID_ADDRESS"));
        assert!(statements.next_val(Sequence::Person).contains("SEQ_ID_PERSON"));
    }
}
