use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::models::todo::{NewTodo, Todo};
use crate::repository::{RepositoryError, RepositoryResult, TodoRepository};

/// Process-local store with the same semantics as [`super::Database`].
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    todos: Vec<Todo>,
    last_id: i32,
}

impl MemoryRepository {
    fn state(&self) -> RepositoryResult<MutexGuard<'_, State>> {
        self.state.lock().map_err(|_| RepositoryError::Poisoned)
    }
}

impl TodoRepository for MemoryRepository {
    fn list_todos(&self) -> RepositoryResult<Vec<Todo>> {
        let mut todos = self.state()?.todos.clone();
        todos.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(todos)
    }

    fn create_todo(&self, todo: NewTodo) -> RepositoryResult<Todo> {
        let mut state = self.state()?;
        state.last_id += 1;
        let todo = Todo {
            id: state.last_id,
            title: todo.title,
            completed: todo.completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        };
        state.todos.push(todo.clone());
        Ok(todo)
    }

    fn set_completed(&self, todo_id: i32, value: bool) -> RepositoryResult<Todo> {
        let mut state = self.state()?;
        let todo = state
            .todos
            .iter_mut()
            .find(|todo| todo.id == todo_id)
            .ok_or(RepositoryError::NotFound(todo_id))?;
        todo.completed = value;
        // the wall clock may step backwards, updated_at must not
        todo.updated_at = Utc::now().max(todo.created_at);
        Ok(todo.clone())
    }

    fn delete_todo(&self, todo_id: i32) -> RepositoryResult<()> {
        let mut state = self.state()?;
        let index = state
            .todos
            .iter()
            .position(|todo| todo.id == todo_id)
            .ok_or(RepositoryError::NotFound(todo_id))?;
        state.todos.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_ids_are_never_reused() {
        let repository = MemoryRepository::default();
        let first = repository.create_todo(NewTodo::new("a".into())).unwrap();
        repository.delete_todo(first.id).unwrap();
        let second = repository.create_todo(NewTodo::new("b".into())).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_list_is_newest_first() {
        let repository = MemoryRepository::default();
        let mut older = NewTodo::new("older".into());
        older.created_at = older.created_at - Duration::seconds(10);
        older.updated_at = older.created_at;
        repository.create_todo(NewTodo::new("newer".into())).unwrap();
        repository.create_todo(older).unwrap();

        let titles: Vec<String> = repository
            .list_todos()
            .unwrap()
            .into_iter()
            .map(|todo| todo.title)
            .collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[test]
    fn test_missing_ids_are_not_found() {
        let repository = MemoryRepository::default();
        assert!(matches!(
            repository.set_completed(42, true),
            Err(RepositoryError::NotFound(42))
        ));
        assert!(matches!(
            repository.delete_todo(42),
            Err(RepositoryError::NotFound(42))
        ));
    }

    #[test]
    fn test_updated_at_never_precedes_created_at() {
        let repository = MemoryRepository::default();
        let mut ahead = NewTodo::new("ahead".into());
        ahead.created_at = Utc::now() + Duration::hours(1);
        ahead.updated_at = ahead.created_at;
        let created = repository.create_todo(ahead).unwrap();
        let updated = repository.set_completed(created.id, true).unwrap();
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn test_set_completed_bumps_updated_at() {
        let repository = MemoryRepository::default();
        let created = repository.create_todo(NewTodo::new("a".into())).unwrap();
        let updated = repository.set_completed(created.id, true).unwrap();
        assert!(updated.completed);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }
}
