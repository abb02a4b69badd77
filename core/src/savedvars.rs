//! Typed encode/decode between the account model and the text format.
//!
//! Key names, field order, and nesting are reproduced exactly; the addon
//! reads these files back and is sensitive to the shape.

use crate::error::{RaffleError, RaffleResult};
use crate::lua_text::{self, LuaKey, LuaTable, LuaValue};
use crate::model::{
    Account, MailBlock, MailEntry, Rank, RosterBlock, RosterEntry, SavedVariables, ACCOUNT_WIDE,
    DEFAULT_SCOPE, ROOT_VARIABLE,
};

// ── Encoding ───────────────────────────────────────────────────────

/// Render a full account set as saved-variables text.
pub fn encode(data: &SavedVariables) -> String {
    let mut scope = LuaTable::new();
    for account in &data.accounts {
        scope.push_str_key(&account.name, LuaValue::Table(encode_account(account)));
    }
    let mut root = LuaTable::new();
    root.push_str_key(DEFAULT_SCOPE, LuaValue::Table(scope));
    lua_text::render_document(ROOT_VARIABLE, &root)
}

fn encode_account(account: &Account) -> LuaTable {
    let mut wide = LuaTable::new();
    wide.push_str_key("version", LuaValue::Int(account.version));
    wide.push_str_key("ticket_cost", LuaValue::Int(account.ticket_cost));
    if let Some(roster) = &account.roster {
        let mut records = LuaTable::new();
        for (i, entry) in roster.entries.iter().enumerate() {
            records.push_index(i as i64 + 1, LuaValue::Table(encode_roster_entry(entry)));
        }
        wide.push_str_key("roster_data", LuaValue::Table(records));
        wide.push_str_key("roster_timestamp", LuaValue::Int(roster.roster_timestamp));
    }
    if let Some(mail) = &account.mail {
        let mut records = LuaTable::new();
        for (i, entry) in mail.entries.iter().enumerate() {
            records.push_index(i as i64 + 1, LuaValue::Table(encode_mail_entry(entry)));
        }
        wide.push_str_key("mail_data", LuaValue::Table(records));
        wide.push_str_key("timestamp", LuaValue::Int(mail.timestamp));
    }

    let mut account_table = LuaTable::new();
    account_table.push_str_key(ACCOUNT_WIDE, LuaValue::Table(wide));
    account_table
}

fn encode_roster_entry(entry: &RosterEntry) -> LuaTable {
    let mut record = LuaTable::new();
    record.push_str_key("account", LuaValue::Str(entry.account.clone()));
    record.push_str_key("join_date", LuaValue::Int(entry.join_date));
    record.push_str_key("sales10", LuaValue::Int(entry.sales10));
    record.push_str_key("sales30", LuaValue::Int(entry.sales30));
    record.push_str_key("purchases10", LuaValue::Int(entry.purchases10));
    record.push_str_key("purchases30", LuaValue::Int(entry.purchases30));
    record.push_str_key("rank", LuaValue::Str(entry.rank.label().to_string()));
    record
}

fn encode_mail_entry(entry: &MailEntry) -> LuaTable {
    let mut record = LuaTable::new();
    record.push_str_key("amount", LuaValue::Int(entry.amount));
    if let Some(subject) = &entry.subject {
        record.push_str_key("subject", LuaValue::Str(subject.clone()));
    }
    if let Some(body) = &entry.body {
        record.push_str_key("body", LuaValue::Str(body.clone()));
    }
    record
}

// ── Decoding ───────────────────────────────────────────────────────

/// Parse saved-variables text back into the account model.
pub fn decode(input: &str) -> RaffleResult<SavedVariables> {
    let (name, root) = lua_text::parse_document(input)?;
    if name != ROOT_VARIABLE {
        return Err(RaffleError::Decode(format!(
            "expected top-level variable {ROOT_VARIABLE:?}, found {name:?}"
        )));
    }
    let scope = table_field(&root, DEFAULT_SCOPE, "root")?;

    let mut accounts = Vec::with_capacity(scope.entries.len());
    for (key, value) in &scope.entries {
        let LuaKey::Str(username) = key else {
            return Err(RaffleError::Decode(format!(
                "account keys under {DEFAULT_SCOPE:?} must be username strings, found {key:?}"
            )));
        };
        let table = value.as_table().ok_or_else(|| {
            RaffleError::Decode(format!("account {username:?} is not a table"))
        })?;
        accounts.push(decode_account(username, table)?);
    }
    Ok(SavedVariables { accounts })
}

fn decode_account(name: &str, table: &LuaTable) -> RaffleResult<Account> {
    let wide = table_field(table, ACCOUNT_WIDE, name)?;
    let version = int_field(wide, "version", name)?;
    let ticket_cost = int_field(wide, "ticket_cost", name)?;

    let roster = match wide.get("roster_data") {
        Some(value) => {
            let records = value.as_table().ok_or_else(|| {
                RaffleError::Decode(format!("{name}: roster_data is not a table"))
            })?;
            let entries = records
                .indexed_values()
                .map(|record| decode_roster_entry(name, record))
                .collect::<RaffleResult<Vec<_>>>()?;
            Some(RosterBlock {
                entries,
                roster_timestamp: int_field(wide, "roster_timestamp", name)?,
            })
        }
        None => None,
    };

    let mail = match wide.get("mail_data") {
        Some(value) => {
            let records = value.as_table().ok_or_else(|| {
                RaffleError::Decode(format!("{name}: mail_data is not a table"))
            })?;
            let entries = records
                .indexed_values()
                .map(|record| decode_mail_entry(name, record))
                .collect::<RaffleResult<Vec<_>>>()?;
            Some(MailBlock {
                entries,
                timestamp: int_field(wide, "timestamp", name)?,
            })
        }
        None => None,
    };

    Ok(Account {
        name: name.to_string(),
        version,
        ticket_cost,
        roster,
        mail,
    })
}

fn decode_roster_entry(account: &str, value: &LuaValue) -> RaffleResult<RosterEntry> {
    let record = value.as_table().ok_or_else(|| {
        RaffleError::Decode(format!("{account}: roster_data record is not a table"))
    })?;
    let rank_label = str_field(record, "rank", account)?;
    let rank = Rank::from_label(rank_label).ok_or_else(|| {
        RaffleError::Decode(format!("{account}: unknown rank {rank_label:?}"))
    })?;
    Ok(RosterEntry {
        account: str_field(record, "account", account)?.to_string(),
        join_date: int_field(record, "join_date", account)?,
        sales10: int_field(record, "sales10", account)?,
        sales30: int_field(record, "sales30", account)?,
        purchases10: int_field(record, "purchases10", account)?,
        purchases30: int_field(record, "purchases30", account)?,
        rank,
    })
}

fn decode_mail_entry(account: &str, value: &LuaValue) -> RaffleResult<MailEntry> {
    let record = value.as_table().ok_or_else(|| {
        RaffleError::Decode(format!("{account}: mail_data record is not a table"))
    })?;
    Ok(MailEntry {
        amount: int_field(record, "amount", account)?,
        subject: opt_str_field(record, "subject", account)?,
        body: opt_str_field(record, "body", account)?,
    })
}

fn table_field<'a>(parent: &'a LuaTable, key: &str, context: &str) -> RaffleResult<&'a LuaTable> {
    parent
        .get(key)
        .ok_or_else(|| RaffleError::Decode(format!("{context}: missing {key:?} table")))?
        .as_table()
        .ok_or_else(|| RaffleError::Decode(format!("{context}: {key:?} is not a table")))
}

fn int_field(parent: &LuaTable, key: &str, context: &str) -> RaffleResult<i64> {
    parent
        .get(key)
        .ok_or_else(|| RaffleError::Decode(format!("{context}: missing {key:?} field")))?
        .as_int()
        .ok_or_else(|| RaffleError::Decode(format!("{context}: {key:?} is not an integer")))
}

fn str_field<'a>(parent: &'a LuaTable, key: &str, context: &str) -> RaffleResult<&'a str> {
    parent
        .get(key)
        .ok_or_else(|| RaffleError::Decode(format!("{context}: missing {key:?} field")))?
        .as_str()
        .ok_or_else(|| RaffleError::Decode(format!("{context}: {key:?} is not a string")))
}

fn opt_str_field(parent: &LuaTable, key: &str, context: &str) -> RaffleResult<Option<String>> {
    match parent.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| RaffleError::Decode(format!("{context}: {key:?} is not a string"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DATA_VERSION;

    fn minimal_file(wide_body: &str) -> String {
        format!(
            "RaffleManager_SavedVariables =\n{{\n    [\"Default\"] = {{\n        \
             [\"@TestUser\"] = {{\n            [\"$AccountWide\"] = {{\n{wide_body}\n            \
             }},\n        }},\n    }},\n}}\n"
        )
    }

    #[test]
    fn decodes_a_blank_account() {
        let text = minimal_file(
            "                [\"version\"] = 1,\n                [\"ticket_cost\"] = 1000,",
        );
        let decoded = decode(&text).unwrap();
        assert_eq!(decoded.accounts.len(), 1);
        let account = &decoded.accounts[0];
        assert_eq!(account.name, "@TestUser");
        assert_eq!(account.version, DATA_VERSION);
        assert_eq!(account.ticket_cost, 1000);
        assert!(account.roster.is_none() && account.mail.is_none());
    }

    #[test]
    fn missing_account_wide_is_a_decode_error() {
        let text = "RaffleManager_SavedVariables =\n{\n    [\"Default\"] = {\n        \
                    [\"@TestUser\"] = {},\n    },\n}\n";
        let err = decode(text).unwrap_err();
        match err {
            RaffleError::Decode(message) => {
                assert!(message.contains("@TestUser"), "message was: {message}");
                assert!(message.contains("$AccountWide"), "message was: {message}");
            }
            other => panic!("expected Decode error, got {other}"),
        }
    }

    #[test]
    fn wrong_root_variable_is_a_decode_error() {
        let err = decode("SomeOtherAddon_SavedVariables = {}").unwrap_err();
        assert!(matches!(err, RaffleError::Decode(_)), "got {err}");
    }

    #[test]
    fn unknown_rank_is_a_decode_error() {
        let text = minimal_file(
            "                [\"version\"] = 1,\n                [\"ticket_cost\"] = 1000,\n\
                             [\"roster_data\"] = {\n                    [1] = {\n\
                                     [\"account\"] = \"@Member\",\n\
                                     [\"join_date\"] = 0,\n\
                                     [\"sales10\"] = 0,\n\
                                     [\"sales30\"] = 0,\n\
                                     [\"purchases10\"] = 0,\n\
                                     [\"purchases30\"] = 0,\n\
                                     [\"rank\"] = \"Archmage\",\n\
                                 },\n                },\n\
                             [\"roster_timestamp\"] = 0,",
        );
        let err = decode(&text).unwrap_err();
        match err {
            RaffleError::Decode(message) => {
                assert!(message.contains("Archmage"), "message was: {message}")
            }
            other => panic!("expected Decode error, got {other}"),
        }
    }
}
