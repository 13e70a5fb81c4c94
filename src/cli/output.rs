use crate::model::task::{Task, display_timestamp};

/// One-line summary: `[x] 12  Title`
pub fn format_task_line(task: &Task) -> String {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    format!("{} {}  {}", checkbox, task.id, task.title)
}

/// Full task block: summary, description, timestamps
pub fn format_task_detail(task: &Task) -> String {
    let mut lines = vec![format_task_line(task)];
    for line in task.description.lines() {
        lines.push(format!("    {}", line));
    }
    lines.push(format!("    created: {}", task.created_display()));
    if let Some(updated) = &task.updated_at {
        lines.push(format!("    updated: {}", display_timestamp(updated)));
    }
    lines.join("\n")
}

pub fn print_tasks(tasks: &[Task], json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
    } else if tasks.is_empty() {
        println!("No tasks yet.");
    } else {
        for task in tasks {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

pub fn print_task(task: &Task, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        println!("{}", format_task_detail(task));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskId;
    use pretty_assertions::assert_eq;

    fn sample() -> Task {
        Task {
            id: TaskId::Text("a1".into()),
            title: "Write report".into(),
            description: "Q3 numbers\nand charts".into(),
            completed: true,
            created_at: "2024-05-01T10:00:00".into(),
            updated_at: Some("2024-05-02T11:15:00".into()),
        }
    }

    #[test]
    fn task_line() {
        assert_eq!(format_task_line(&sample()), "[x] a1  Write report");
    }

    #[test]
    fn task_detail() {
        assert_eq!(
            format_task_detail(&sample()),
            "\
[x] a1  Write report
    Q3 numbers
    and charts
    created: 2024-05-01 10:00
    updated: 2024-05-02 11:15"
        );
    }
}
