//! Sidebar tree use-case service.
//!
//! # Responsibility
//! - Create and arrange sections, projects, subprojects and saved searches.
//! - Enforce the nesting depth limit and pinned-project rules.
//!
//! # Invariants
//! - Ids derived from names are slugs (`Home Office` -> `home-office`) and
//!   unique within their kind.
//! - Pinned projects never take part in drag reordering.
//! - The project tree is never deeper than [`MAX_PROJECT_DEPTH`].

use crate::model::criteria::{SavedSearch, SearchQuery};
use crate::model::project::{
    slugify, Project, ProjectColor, ProjectKind, Section, MAX_PROJECT_DEPTH,
};
use crate::repo::block_repo::RepoError;
use crate::repo::project_repo::ProjectRepository;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Service error for sidebar use-cases.
#[derive(Debug)]
pub enum ProjectServiceError {
    /// Name is empty after trimming.
    InvalidName,
    ProjectNotFound(String),
    SectionNotFound(String),
    /// Another item of the same kind already uses this id.
    DuplicateId(String),
    /// Adding below `parent` would exceed the depth limit.
    DepthExceeded { parent: String, max: usize },
    /// Repository failure.
    Repo(RepoError),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "name must not be empty"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::SectionNotFound(id) => write!(f, "section not found: {id}"),
            Self::DuplicateId(id) => write!(f, "id already in use: {id}"),
            Self::DepthExceeded { parent, max } => {
                write!(f, "cannot nest below {parent}: max depth is {max}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ProjectNotFound(id) => Self::ProjectNotFound(id),
            RepoError::SectionNotFound(id) => Self::SectionNotFound(id),
            RepoError::DuplicateId(id) => Self::DuplicateId(id),
            other => Self::Repo(other),
        }
    }
}

/// Partial project update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub color: Option<ProjectColor>,
    pub icon: Option<String>,
}

/// Sidebar facade over a project repository.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn list_projects(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.repo.list_projects()?)
    }

    pub fn list_sections(&self) -> ProjectServiceResult<Vec<Section>> {
        Ok(self.repo.list_sections()?)
    }

    pub fn list_saved_searches(&self) -> ProjectServiceResult<Vec<SavedSearch>> {
        Ok(self.repo.list_saved_searches()?)
    }

    /// Display name of a collection id, when it belongs to a project.
    pub fn project_name(&self, id: &str) -> ProjectServiceResult<Option<String>> {
        let projects = self.repo.list_projects()?;
        Ok(find_in(&projects, id).map(|project| project.name.clone()))
    }

    pub fn create_section(
        &mut self,
        name: &str,
        color: ProjectColor,
    ) -> ProjectServiceResult<Section> {
        let id = slug_for(name)?;
        let mut sections = self.repo.list_sections()?;
        if sections.iter().any(|section| section.id == id) {
            return Err(ProjectServiceError::DuplicateId(id));
        }

        let section = Section {
            id,
            name: name.trim().to_string(),
            color,
            collapsed: false,
        };
        sections.push(section.clone());
        self.repo.save_sections(sections)?;
        info!("event=section_create module=project status=ok");
        Ok(section)
    }

    pub fn toggle_section_collapse(&mut self, id: &str) -> ProjectServiceResult<bool> {
        let mut sections = self.repo.list_sections()?;
        let section = sections
            .iter_mut()
            .find(|section| section.id == id)
            .ok_or_else(|| ProjectServiceError::SectionNotFound(id.to_string()))?;
        section.collapsed = !section.collapsed;
        let collapsed = section.collapsed;
        self.repo.save_sections(sections)?;
        Ok(collapsed)
    }

    /// Moves section `dragged` to `target`'s position.
    pub fn reorder_sections(&mut self, dragged: &str, target: &str) -> ProjectServiceResult<bool> {
        let mut sections = self.repo.list_sections()?;
        let from = sections.iter().position(|section| section.id == dragged);
        let to = sections.iter().position(|section| section.id == target);
        let (Some(from), Some(to)) = (from, to) else {
            return Ok(false);
        };

        let moved = sections.remove(from);
        sections.insert(to, moved);
        self.repo.save_sections(sections)?;
        Ok(true)
    }

    /// Creates a top-level project, optionally inside a section.
    pub fn create_project(
        &mut self,
        name: &str,
        color: Option<ProjectColor>,
        section_id: Option<&str>,
    ) -> ProjectServiceResult<Project> {
        let id = slug_for(name)?;
        if let Some(section_id) = section_id {
            self.require_section(section_id)?;
        }
        let mut projects = self.repo.list_projects()?;
        if find_in(&projects, &id).is_some() {
            return Err(ProjectServiceError::DuplicateId(id));
        }

        let mut project = Project::new(id, name.trim(), ProjectKind::Project);
        project.color = color;
        project.section_id = section_id.map(str::to_string);
        projects.push(project.clone());
        self.repo.save_projects(projects)?;
        info!("event=project_create module=project status=ok kind=project");
        Ok(project)
    }

    /// Adds a subproject below `parent_id`.
    ///
    /// Fails with [`ProjectServiceError::DepthExceeded`] when the new
    /// project would sit deeper than [`MAX_PROJECT_DEPTH`].
    pub fn add_subproject(
        &mut self,
        parent_id: &str,
        name: &str,
        color: Option<ProjectColor>,
    ) -> ProjectServiceResult<Project> {
        let id = slug_for(name)?;
        let mut projects = self.repo.list_projects()?;
        let level = level_of(&projects, parent_id, 1)
            .ok_or_else(|| ProjectServiceError::ProjectNotFound(parent_id.to_string()))?;
        if level + 1 > MAX_PROJECT_DEPTH {
            return Err(ProjectServiceError::DepthExceeded {
                parent: parent_id.to_string(),
                max: MAX_PROJECT_DEPTH,
            });
        }
        if find_in(&projects, &id).is_some() {
            return Err(ProjectServiceError::DuplicateId(id));
        }

        let mut child = Project::new(id, name.trim(), ProjectKind::Subproject);
        child.color = color;
        let parent = find_in_mut(&mut projects, parent_id)
            .ok_or_else(|| ProjectServiceError::ProjectNotFound(parent_id.to_string()))?;
        parent.subprojects.push(child.clone());
        self.repo.save_projects(projects)?;
        info!(
            "event=project_create module=project status=ok kind=subproject level={}",
            level + 1
        );
        Ok(child)
    }

    /// Applies a partial update to any project in the tree.
    pub fn update_project(
        &mut self,
        id: &str,
        update: ProjectUpdate,
    ) -> ProjectServiceResult<Project> {
        if update
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ProjectServiceError::InvalidName);
        }

        self.modify_project(id, |project| {
            if let Some(name) = update.name {
                project.name = name.trim().to_string();
            }
            if let Some(color) = update.color {
                project.color = Some(color);
            }
            if let Some(icon) = update.icon {
                project.icon = Some(icon);
            }
        })
    }

    pub fn toggle_project_collapse(&mut self, id: &str) -> ProjectServiceResult<bool> {
        let project = self.modify_project(id, |project| project.collapsed = !project.collapsed)?;
        Ok(project.collapsed)
    }

    /// Assigns a top-level project to a section.
    pub fn move_project_to_section(
        &mut self,
        project_id: &str,
        section_id: &str,
    ) -> ProjectServiceResult<Project> {
        self.require_section(section_id)?;
        let mut projects = self.repo.list_projects()?;
        let project = projects
            .iter_mut()
            .find(|project| project.id == project_id)
            .ok_or_else(|| ProjectServiceError::ProjectNotFound(project_id.to_string()))?;
        project.section_id = Some(section_id.to_string());
        let moved = project.clone();
        self.repo.save_projects(projects)?;
        Ok(moved)
    }

    /// Drag-reorders top-level projects.
    ///
    /// Dropping onto a project of another section also moves the dragged
    /// project into that section. Pinned projects stay first and are never
    /// a valid drag source or target.
    pub fn reorder_projects(&mut self, dragged: &str, target: &str) -> ProjectServiceResult<bool> {
        let projects = self.repo.list_projects()?;
        let (pinned, mut draggable): (Vec<Project>, Vec<Project>) = projects
            .into_iter()
            .partition(|project| project.kind == ProjectKind::Pinned);

        let from = draggable.iter().position(|project| project.id == dragged);
        let to = draggable.iter().position(|project| project.id == target);
        let (Some(from), Some(to)) = (from, to) else {
            return Ok(false);
        };

        let target_section = draggable[to].section_id.clone();
        let mut moved = draggable.remove(from);
        moved.section_id = target_section;
        draggable.insert(to, moved);

        self.repo
            .save_projects(pinned.into_iter().chain(draggable).collect())?;
        Ok(true)
    }

    pub fn pin_project(&mut self, id: &str) -> ProjectServiceResult<Project> {
        self.set_top_level_kind(id, ProjectKind::Pinned)
    }

    pub fn unpin_project(&mut self, id: &str) -> ProjectServiceResult<Project> {
        self.set_top_level_kind(id, ProjectKind::Project)
    }

    /// Removes a project (with its subprojects) from the tree.
    ///
    /// Block collections are left in place; callers can drop them using
    /// [`Project::collect_ids`] on the returned project.
    pub fn delete_project(&mut self, id: &str) -> ProjectServiceResult<Project> {
        let mut projects = self.repo.list_projects()?;
        let removed = remove_from(&mut projects, id)
            .ok_or_else(|| ProjectServiceError::ProjectNotFound(id.to_string()))?;
        self.repo.save_projects(projects)?;
        info!("event=project_delete module=project status=ok");
        Ok(removed)
    }

    /// Saves a named search; its id is the slug of the name.
    pub fn create_saved_search(
        &mut self,
        name: &str,
        query: SearchQuery,
        color: ProjectColor,
    ) -> ProjectServiceResult<SavedSearch> {
        let search = SavedSearch {
            id: slug_for(name)?,
            name: name.trim().to_string(),
            color,
            query,
        };
        self.repo.add_saved_search(search.clone())?;
        info!("event=saved_search_create module=project status=ok");
        Ok(search)
    }

    fn require_section(&self, id: &str) -> ProjectServiceResult<()> {
        if self
            .repo
            .list_sections()?
            .iter()
            .any(|section| section.id == id)
        {
            Ok(())
        } else {
            Err(ProjectServiceError::SectionNotFound(id.to_string()))
        }
    }

    fn modify_project<F>(&mut self, id: &str, apply: F) -> ProjectServiceResult<Project>
    where
        F: FnOnce(&mut Project),
    {
        let mut projects = self.repo.list_projects()?;
        let project = find_in_mut(&mut projects, id)
            .ok_or_else(|| ProjectServiceError::ProjectNotFound(id.to_string()))?;
        apply(project);
        let updated = project.clone();
        self.repo.save_projects(projects)?;
        Ok(updated)
    }

    fn set_top_level_kind(&mut self, id: &str, kind: ProjectKind) -> ProjectServiceResult<Project> {
        let mut projects = self.repo.list_projects()?;
        let project = projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or_else(|| ProjectServiceError::ProjectNotFound(id.to_string()))?;
        project.kind = kind;
        let updated = project.clone();
        self.repo.save_projects(projects)?;
        Ok(updated)
    }
}

fn slug_for(name: &str) -> ProjectServiceResult<String> {
    let id = slugify(name);
    if id.is_empty() {
        return Err(ProjectServiceError::InvalidName);
    }
    Ok(id)
}

fn find_in<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find_map(|project| project.find(id))
}

fn find_in_mut<'a>(projects: &'a mut [Project], id: &str) -> Option<&'a mut Project> {
    projects.iter_mut().find_map(|project| project.find_mut(id))
}

fn level_of(projects: &[Project], id: &str, level: usize) -> Option<usize> {
    projects.iter().find_map(|project| {
        if project.id == id {
            Some(level)
        } else {
            level_of(&project.subprojects, id, level + 1)
        }
    })
}

fn remove_from(projects: &mut Vec<Project>, id: &str) -> Option<Project> {
    if let Some(index) = projects.iter().position(|project| project.id == id) {
        return Some(projects.remove(index));
    }
    projects
        .iter_mut()
        .find_map(|project| remove_from(&mut project.subprojects, id))
}

#[cfg(test)]
mod tests {
    use super::{ProjectService, ProjectServiceError, ProjectUpdate};
    use crate::model::block::Priority;
    use crate::model::criteria::SearchQuery;
    use crate::model::project::{Project, ProjectColor, ProjectKind, Section};
    use crate::repo::project_repo::InMemoryProjectRepository;

    fn service() -> ProjectService<InMemoryProjectRepository> {
        let mut inbox = Project::new("inbox", "Inbox", ProjectKind::Pinned);
        inbox.icon = Some("inbox".to_string());
        let mut work = Project::new("work", "Work", ProjectKind::Project);
        work.section_id = Some("main".to_string());
        let mut home = Project::new("home", "Home", ProjectKind::Project);
        home.section_id = Some("main".to_string());
        let mut garden = Project::new("garden", "Garden", ProjectKind::Project);
        garden.section_id = Some("side".to_string());

        let sections = vec![
            Section {
                id: "main".to_string(),
                name: "Main".to_string(),
                color: ProjectColor::Blue,
                collapsed: false,
            },
            Section {
                id: "side".to_string(),
                name: "Side".to_string(),
                color: ProjectColor::Green,
                collapsed: false,
            },
        ];
        ProjectService::new(InMemoryProjectRepository::new(
            vec![inbox, work, home, garden],
            sections,
            Vec::new(),
        ))
    }

    fn top_level_ids(service: &ProjectService<InMemoryProjectRepository>) -> Vec<String> {
        service
            .list_projects()
            .unwrap()
            .into_iter()
            .map(|project| project.id)
            .collect()
    }

    #[test]
    fn create_section_uses_slug_id_and_rejects_duplicates() {
        let mut service = service();
        let section = service
            .create_section("Side Quests", ProjectColor::Teal)
            .unwrap();
        assert_eq!(section.id, "side-quests");
        assert!(matches!(
            service.create_section("side quests", ProjectColor::Red),
            Err(ProjectServiceError::DuplicateId(_))
        ));
        assert!(matches!(
            service.create_section("   ", ProjectColor::Red),
            Err(ProjectServiceError::InvalidName)
        ));
    }

    #[test]
    fn subprojects_nest_up_to_max_depth() {
        let mut service = service();
        let mut parent = "work".to_string();
        for level in 2..=5 {
            let child = service
                .add_subproject(&parent, &format!("Level {level}"), None)
                .unwrap();
            assert_eq!(child.kind, ProjectKind::Subproject);
            parent = child.id;
        }

        let err = service.add_subproject(&parent, "Too Deep", None).unwrap_err();
        assert!(matches!(err, ProjectServiceError::DepthExceeded { max: 5, .. }));

        let work = service
            .list_projects()
            .unwrap()
            .into_iter()
            .find(|project| project.id == "work")
            .unwrap();
        assert_eq!(work.depth(), 5);
    }

    #[test]
    fn reorder_within_section_keeps_pinned_first() {
        let mut service = service();
        assert!(service.reorder_projects("home", "work").unwrap());
        assert_eq!(top_level_ids(&service), vec!["inbox", "home", "work", "garden"]);
        assert!(!service.reorder_projects("inbox", "work").unwrap());
    }

    #[test]
    fn reorder_across_sections_moves_into_target_section() {
        let mut service = service();
        assert!(service.reorder_projects("garden", "work").unwrap());
        let projects = service.list_projects().unwrap();
        let garden = projects.iter().find(|project| project.id == "garden").unwrap();
        assert_eq!(garden.section_id.as_deref(), Some("main"));
        assert_eq!(top_level_ids(&service), vec!["inbox", "garden", "work", "home"]);
    }

    #[test]
    fn reorder_sections_uses_splice_semantics() {
        let mut service = service();
        assert!(service.reorder_sections("side", "main").unwrap());
        let ids: Vec<String> = service
            .list_sections()
            .unwrap()
            .into_iter()
            .map(|section| section.id)
            .collect();
        assert_eq!(ids, vec!["side", "main"]);
        assert!(!service.reorder_sections("side", "nope").unwrap());
    }

    #[test]
    fn pin_and_unpin_switch_kind() {
        let mut service = service();
        assert_eq!(service.pin_project("home").unwrap().kind, ProjectKind::Pinned);
        assert_eq!(
            service.unpin_project("home").unwrap().kind,
            ProjectKind::Project
        );
    }

    #[test]
    fn update_and_collapse_reach_nested_projects() {
        let mut service = service();
        service.add_subproject("home", "Kitchen", None).unwrap();
        let updated = service
            .update_project(
                "kitchen",
                ProjectUpdate {
                    name: Some("Kitchen Remodel".to_string()),
                    color: Some(ProjectColor::Orange),
                    icon: None,
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Kitchen Remodel");
        assert_eq!(updated.color, Some(ProjectColor::Orange));
        assert!(service.toggle_project_collapse("kitchen").unwrap());
        assert_eq!(
            service.project_name("kitchen").unwrap().as_deref(),
            Some("Kitchen Remodel")
        );
    }

    #[test]
    fn move_to_unknown_section_fails() {
        let mut service = service();
        assert!(matches!(
            service.move_project_to_section("work", "nowhere"),
            Err(ProjectServiceError::SectionNotFound(_))
        ));
        let moved = service.move_project_to_section("work", "side").unwrap();
        assert_eq!(moved.section_id.as_deref(), Some("side"));
    }

    #[test]
    fn delete_removes_whole_subtree() {
        let mut service = service();
        service.add_subproject("home", "Kitchen", None).unwrap();
        let removed = service.delete_project("home").unwrap();
        let mut ids = Vec::new();
        removed.collect_ids(&mut ids);
        assert_eq!(ids, vec!["home", "kitchen"]);
        assert_eq!(service.project_name("kitchen").unwrap(), None);
    }

    #[test]
    fn saved_search_id_is_slug_of_name() {
        let mut service = service();
        let search = service
            .create_saved_search(
                "Urgent Stuff",
                SearchQuery {
                    priority: Some(Priority::P1),
                    ..SearchQuery::default()
                },
                ProjectColor::Red,
            )
            .unwrap();
        assert_eq!(search.id, "urgent-stuff");
        assert_eq!(service.list_saved_searches().unwrap().len(), 1);
    }
}
