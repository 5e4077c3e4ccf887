//! Site operations. Deleting a site never touches its logs or memos.

use std::collections::HashMap;

use searchlog_types::{Site, SiteInput};

use super::super::{new_id, Database};
use crate::error::DbResult;

impl Database {
    pub fn list_sites(&self) -> DbResult<Vec<Site>> {
        self.read_all()
    }

    pub fn get_site(&self, id: &str) -> DbResult<Site> {
        self.find("site", id)
    }

    /// Site id -> name, for annotating logs and memos
    pub fn site_names(&self) -> DbResult<HashMap<String, String>> {
        Ok(self
            .list_sites()?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect())
    }

    pub fn create_site(&self, input: SiteInput) -> DbResult<String> {
        let id = new_id();
        self.insert(Site {
            id: id.clone(),
            name: input.name,
            url: input.url,
        })?;
        log::info!("[SITES] Created site {}", id);
        Ok(id)
    }

    /// Returns false when no site has `id`
    pub fn update_site(&self, id: &str, input: SiteInput) -> DbResult<bool> {
        self.update_where(id, |site: &mut Site| {
            site.name = input.name;
            site.url = input.url;
        })
    }

    pub fn delete_site(&self, id: &str) -> DbResult<bool> {
        let removed = self.remove::<Site>(id)?;
        if removed {
            log::info!("[SITES] Deleted site {}", id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::test_db;
    use crate::error::DbError;
    use searchlog_types::{LogInput, SiteInput};

    fn input(name: &str) -> SiteInput {
        SiteInput {
            name: name.to_string(),
            url: format!("https://{}.example", name),
        }
    }

    #[test]
    fn test_site_crud() {
        let db = test_db();

        let id = db.create_site(input("docs")).unwrap();
        assert_eq!(db.get_site(&id).unwrap().name, "docs");

        assert!(db.update_site(&id, input("wiki")).unwrap());
        let site = db.get_site(&id).unwrap();
        assert_eq!(site.name, "wiki");
        assert_eq!(site.url, "https://wiki.example");

        assert!(db.delete_site(&id).unwrap());
        assert!(matches!(db.get_site(&id), Err(DbError::NotFound { .. })));
    }

    #[test]
    fn test_update_and_delete_missing_site_are_noops() {
        let db = test_db();
        db.create_site(input("docs")).unwrap();

        assert!(!db.update_site("ghost", input("x")).unwrap());
        assert!(!db.delete_site("ghost").unwrap());
        assert_eq!(db.list_sites().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_site_does_not_cascade() {
        let db = test_db();
        let site_id = db.create_site(input("docs")).unwrap();
        db.create_log(LogInput {
            site_id: site_id.clone(),
            word: "query".into(),
            ..Default::default()
        })
        .unwrap();

        db.delete_site(&site_id).unwrap();

        let logs = db.list_logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].site_id, site_id);
    }
}
