//! Project, section and saved search repository.
//!
//! # Responsibility
//! - Store the sidebar tree (projects with nested subprojects), sections
//!   and saved searches.
//!
//! # Invariants
//! - Project list order is sidebar order; pinned projects included.
//! - Saved search ids are unique.

use crate::model::criteria::SavedSearch;
use crate::model::project::{Project, Section};
use crate::repo::block_repo::{RepoError, RepoResult};

/// Repository interface for the sidebar model.
pub trait ProjectRepository {
    /// Top-level projects in sidebar order.
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    /// Replaces the full project tree.
    fn save_projects(&mut self, projects: Vec<Project>) -> RepoResult<()>;
    fn list_sections(&self) -> RepoResult<Vec<Section>>;
    /// Replaces the full ordered section list.
    fn save_sections(&mut self, sections: Vec<Section>) -> RepoResult<()>;
    fn list_saved_searches(&self) -> RepoResult<Vec<SavedSearch>>;
    fn get_saved_search(&self, id: &str) -> RepoResult<Option<SavedSearch>>;
    /// Appends a saved search; rejects duplicate ids.
    fn add_saved_search(&mut self, search: SavedSearch) -> RepoResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Vec<Project>,
    sections: Vec<Section>,
    saved_searches: Vec<SavedSearch>,
}

impl InMemoryProjectRepository {
    pub fn new(
        projects: Vec<Project>,
        sections: Vec<Section>,
        saved_searches: Vec<SavedSearch>,
    ) -> Self {
        Self {
            projects,
            sections,
            saved_searches,
        }
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        Ok(self.projects.clone())
    }

    fn save_projects(&mut self, projects: Vec<Project>) -> RepoResult<()> {
        self.projects = projects;
        Ok(())
    }

    fn list_sections(&self) -> RepoResult<Vec<Section>> {
        Ok(self.sections.clone())
    }

    fn save_sections(&mut self, sections: Vec<Section>) -> RepoResult<()> {
        self.sections = sections;
        Ok(())
    }

    fn list_saved_searches(&self) -> RepoResult<Vec<SavedSearch>> {
        Ok(self.saved_searches.clone())
    }

    fn get_saved_search(&self, id: &str) -> RepoResult<Option<SavedSearch>> {
        Ok(self
            .saved_searches
            .iter()
            .find(|search| search.id == id)
            .cloned())
    }

    fn add_saved_search(&mut self, search: SavedSearch) -> RepoResult<()> {
        if self.saved_searches.iter().any(|existing| existing.id == search.id) {
            return Err(RepoError::DuplicateId(search.id));
        }
        self.saved_searches.push(search);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryProjectRepository, ProjectRepository};
    use crate::model::criteria::{SavedSearch, SearchQuery};
    use crate::model::project::ProjectColor;
    use crate::repo::block_repo::RepoError;

    #[test]
    fn saved_search_ids_must_be_unique() {
        let mut repo = InMemoryProjectRepository::default();
        let search = SavedSearch {
            id: "urgent".to_string(),
            name: "Urgent".to_string(),
            color: ProjectColor::Red,
            query: SearchQuery::default(),
        };
        repo.add_saved_search(search.clone()).unwrap();
        assert_eq!(
            repo.add_saved_search(search).unwrap_err(),
            RepoError::DuplicateId("urgent".to_string())
        );
        assert!(repo.get_saved_search("urgent").unwrap().is_some());
    }
}
