//! Demonstration of a Store managing a todo list through actions

use tincan_redux::{create_store, reducer, Reducer};

#[derive(Clone, Debug)]
struct TodoItem {
    id: usize,
    title: String,
    completed: bool,
}

#[derive(Clone, Debug, PartialEq)]
enum TodoFilter {
    All,
    Active,
    Completed,
}

#[derive(Clone, Debug)]
struct AppState {
    todos: Vec<TodoItem>,
    filter: TodoFilter,
}

#[derive(Debug)]
enum Action {
    AddTodo(String),
    ToggleTodo(usize),
    SetFilter(TodoFilter),
}

impl AppState {
    fn new() -> Self {
        Self {
            todos: Vec::new(),
            filter: TodoFilter::All,
        }
    }

    fn filtered_todos(&self) -> Vec<&TodoItem> {
        match self.filter {
            TodoFilter::All => self.todos.iter().collect(),
            TodoFilter::Active => self.todos.iter().filter(|t| !t.completed).collect(),
            TodoFilter::Completed => self.todos.iter().filter(|t| t.completed).collect(),
        }
    }

    fn stats(&self) -> (usize, usize, usize) {
        let total = self.todos.len();
        let completed = self.todos.iter().filter(|t| t.completed).count();
        let active = total - completed;
        (total, active, completed)
    }
}

fn todos() -> Reducer<AppState, Action> {
    reducer(|state: Option<&AppState>, action: &Action| {
        let mut next = state.cloned().unwrap_or_else(AppState::new);
        match action {
            Action::AddTodo(title) => {
                let id = next.todos.len();
                next.todos.push(TodoItem {
                    id,
                    title: title.clone(),
                    completed: false,
                });
            }
            Action::ToggleTodo(id) => {
                if let Some(todo) = next.todos.iter_mut().find(|t| t.id == *id) {
                    todo.completed = !todo.completed;
                }
            }
            Action::SetFilter(filter) => next.filter = filter.clone(),
        }
        next
    })
}

fn print_todos(state: &AppState) {
    for todo in state.filtered_todos() {
        let status = if todo.completed { "✓" } else { " " };
        println!("   [{}] {}", status, todo.title);
    }
}

fn main() {
    println!("=== Store Example: Todo App ===\n");

    let store = create_store(todos(), Some(AppState::new()), None);

    println!("1. Setting up listener");
    let reader = store.clone();
    store.subscribe(move || {
        reader.read(|state| {
            if let Some(state) = state {
                let (total, active, completed) = state.stats();
                println!(
                    "   [Store Update] Total: {}, Active: {}, Completed: {}",
                    total, active, completed
                );
            }
        });
    });

    println!("\n2. Adding todos");
    for title in ["Learn Rust", "Build a state container", "Write documentation"] {
        let _ = store.dispatch(Action::AddTodo(title.to_string()));
    }

    println!("\n3. Current todos:");
    store.read(|state| {
        if let Some(state) = state {
            print_todos(state);
        }
    });

    println!("\n4. Completing first two todos");
    let _ = store.dispatch(Action::ToggleTodo(0));
    let _ = store.dispatch(Action::ToggleTodo(1));

    println!("\n5. Active todos:");
    let _ = store.dispatch(Action::SetFilter(TodoFilter::Active));
    store.read(|state| {
        if let Some(state) = state {
            print_todos(state);
        }
    });

    println!("\n6. Completed todos:");
    let _ = store.dispatch(Action::SetFilter(TodoFilter::Completed));
    store.read(|state| {
        if let Some(state) = state {
            print_todos(state);
        }
    });

    println!("\n✓ Example complete!");
}
