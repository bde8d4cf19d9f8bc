use crate::domain::storage::GameRecordStore;
use crate::domain::{points_for, ScrapedDay};
use crate::error::Result;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS games (
    game_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT,
    published   TEXT NOT NULL,
    is_active   INTEGER NOT NULL DEFAULT 1
);
CREATE TABLE IF NOT EXISTS rounds (
    round_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id      INTEGER NOT NULL REFERENCES games(game_id),
    round_number INTEGER NOT NULL,
    answer       TEXT NOT NULL,
    category     TEXT
);
CREATE TABLE IF NOT EXISTS clues (
    clue_id         INTEGER PRIMARY KEY AUTOINCREMENT,
    round_id        INTEGER NOT NULL REFERENCES rounds(round_id),
    clue_number     INTEGER NOT NULL,
    clue_text       TEXT NOT NULL,
    percent_correct INTEGER NOT NULL CHECK (percent_correct BETWEEN 0 AND 100),
    points          INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_rounds_game ON rounds(game_id);
CREATE INDEX IF NOT EXISTS idx_clues_round ON clues(round_id);
"#;

pub struct SqliteStore {
    pub(crate) conn: Connection,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!("journal_mode={mode}");
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        info!("Opened database {}", path.as_ref().display());
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }
}

impl GameRecordStore for SqliteStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn ensure_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn insert_game(&mut self, day: &ScrapedDay) -> Result<Option<i64>> {
        // Dropping the transaction without commit rolls everything back
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO games (published) VALUES (?1)",
            params![day.published.format("%Y-%m-%d").to_string()],
        )?;
        let game_id = tx.last_insert_rowid();

        for (r, round) in day.rounds.iter().enumerate() {
            let round_number = r as u32 + 1;
            tx.execute(
                "INSERT INTO rounds (game_id, round_number, answer, category) VALUES (?1, ?2, ?3, ?4)",
                params![game_id, round_number, round.answer, round.category],
            )?;
            let round_id = tx.last_insert_rowid();

            for (i, clue) in round.clues.iter().enumerate() {
                let clue_number = i as u32 + 1;
                tx.execute(
                    "INSERT INTO clues (round_id, clue_number, clue_text, percent_correct, points)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        round_id,
                        clue_number,
                        clue.text,
                        clue.percent_correct,
                        points_for(clue_number)
                    ],
                )?;
            }
        }

        tx.commit()?;
        debug!("Stored game {game_id} for {}", day.published);
        Ok(Some(game_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParsedClue, ScrapedRound};
    use crate::error::ScrapeError;

    fn day() -> ScrapedDay {
        ScrapedDay {
            published: "2024-01-01".parse().unwrap(),
            rounds: vec![
                ScrapedRound::new(
                    1,
                    "Everest".to_string(),
                    vec![
                        ParsedClue::new("It is tall.", 40).unwrap(),
                        ParsedClue::new("It is in Nepal.", 70).unwrap(),
                        ParsedClue::new("Hillary climbed it.", 95).unwrap(),
                    ],
                ),
                ScrapedRound::new(
                    2,
                    "Paris".to_string(),
                    vec![ParsedClue::new("City of light?", 55).unwrap()],
                ),
            ],
        }
    }

    fn store() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    fn count(store: &SqliteStore, table: &str) -> i64 {
        store
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let mut store = store();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(count(&store, "games"), 0);
    }

    #[test]
    fn inserts_rounds_and_clues_with_points() {
        let mut store = store();
        let game_id = store.insert_game(&day()).unwrap().unwrap();

        assert_eq!(count(&store, "games"), 1);
        assert_eq!(count(&store, "rounds"), 2);
        assert_eq!(count(&store, "clues"), 4);

        let published: String = store
            .conn
            .query_row(
                "SELECT published FROM games WHERE game_id = ?1",
                [game_id],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(published, "2024-01-01");

        let mut stmt = store
            .conn
            .prepare(
                "SELECT c.clue_number, c.percent_correct, c.points FROM clues c
                 JOIN rounds r ON r.round_id = c.round_id
                 WHERE r.round_number = 1 ORDER BY c.clue_number",
            )
            .unwrap();
        let rows: Vec<(u32, u8, u32)> = stmt
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(rows, vec![(1, 40, 3), (2, 70, 2), (3, 95, 1)]);

        let category: Option<String> = store
            .conn
            .query_row("SELECT category FROM rounds LIMIT 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(category, None);
    }

    #[test]
    fn inserting_same_day_twice_duplicates_the_game() {
        let mut store = store();
        let first = store.insert_game(&day()).unwrap();
        let second = store.insert_game(&day()).unwrap();

        assert_ne!(first, second);
        assert_eq!(count(&store, "games"), 2);
        assert_eq!(count(&store, "rounds"), 4);
    }

    #[test]
    fn rounds_are_numbered_by_position() {
        let mut store = store();
        let mut gapped = day();
        gapped.rounds[1].round_number = 3;
        gapped.rounds.push(ScrapedRound::new(
            5,
            "Tolkien".to_string(),
            vec![ParsedClue::new("Wrote about hobbits.", 77).unwrap()],
        ));
        store.insert_game(&gapped).unwrap();

        let mut stmt = store
            .conn
            .prepare("SELECT round_number FROM rounds ORDER BY round_id")
            .unwrap();
        let numbers: Vec<u32> = stmt
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn failed_insert_leaves_nothing_behind() {
        let mut store = store();
        store
            .conn
            .execute_batch(
                "CREATE TRIGGER reject_clue BEFORE INSERT ON clues
                 WHEN NEW.clue_text = 'City of light?'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let err = store.insert_game(&day()).unwrap_err();
        assert!(matches!(err, ScrapeError::Storage(_)));

        assert_eq!(count(&store, "games"), 0);
        assert_eq!(count(&store, "rounds"), 0);
        assert_eq!(count(&store, "clues"), 0);
    }

    #[test]
    fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thrice.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.ensure_schema().unwrap();
            store.insert_game(&day()).unwrap();
        }

        let mut store = SqliteStore::open(&path).unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(count(&store, "games"), 1);
        assert_eq!(count(&store, "clues"), 4);
    }
}
