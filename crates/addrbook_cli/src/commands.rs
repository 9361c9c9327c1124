//! Command parsing and dispatch for the interactive loop.
//!
//! `execute` is the only error boundary: any command failure is printed and
//! the loop keeps running. Arguments are split shell-style, so a name with
//! spaces is written in quotes: `add "John Smith" 0501234567`.

use addrbook_core::{AddOutcome, ChangeOutcome, ContactService};
use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};

const USAGE: &str = "Commands: hello, add <name> <phone>, remove <name>, \
change_name <old> <new>, change_phone <name> <old> <new>, add_phone <name> <phone>, \
remove_phone <name> <phone>, show <name>, all, add_birthday <name> <DD.MM.YYYY>, \
edit_birthday <name> <DD.MM.YYYY>, show_birthday, upcoming_birthdays [days], exit. Quote names that contain spaces.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Runs one input line against the service and prints the result.
pub fn execute(service: &mut ContactService, line: &str, horizon_days: u32) -> Flow {
    let today = Local::now().date_naive();
    match run(service, line, horizon_days, today) {
        Ok((flow, output)) => {
            for message in output {
                println!("{message}");
            }
            flow
        }
        Err(err) => {
            log::debug!("event=command module=cli status=error error={err}");
            println!("Error: {err}");
            Flow::Continue
        }
    }
}

fn run(
    service: &mut ContactService,
    line: &str,
    horizon_days: u32,
    today: NaiveDate,
) -> Result<(Flow, Vec<String>)> {
    let Some(tokens) = shlex::split(line) else {
        bail!("unbalanced quotes in command");
    };
    let parts: Vec<&str> = tokens.iter().map(String::as_str).collect();
    let Some((command, args)) = parts.split_first() else {
        return Ok((Flow::Continue, Vec::new()));
    };

    let output = match (command.to_lowercase().as_str(), args) {
        ("exit" | "close", []) => return Ok((Flow::Exit, Vec::new())),
        ("hello", []) => vec!["How can I help you?".to_string()],
        ("add", [name, phone]) => match service.add_contact(name, phone)? {
            AddOutcome::Created => vec!["Contact added.".to_string()],
            AddOutcome::Replaced => vec!["Contact replaced.".to_string()],
        },
        ("remove", [name]) => vec![describe(service.remove_contact(name), "Contact removed.")],
        ("change_name", [old, new]) => {
            vec![describe(service.change_name(old, new), "Contact name changed.")]
        }
        ("change_phone", [name, old, new]) => vec![describe(
            service.change_phone(name, old, new)?,
            "Phone number changed.",
        )],
        ("add_phone", [name, phone]) => {
            vec![describe(service.add_phone(name, phone)?, "Phone number added.")]
        }
        ("remove_phone", [name, phone]) => {
            vec![describe(service.remove_phone(name, phone), "Phone number removed.")]
        }
        ("show", [name]) => match service.show_contact(name) {
            Some(record) => vec![record.render()],
            None => vec!["Contact not found.".to_string()],
        },
        ("all", []) => {
            let mut lines = vec!["All contacts:".to_string()];
            lines.extend(service.all_contacts().iter().map(|record| record.render()));
            lines
        }
        ("add_birthday", [name, date]) => {
            vec![describe(service.add_birthday(name, date)?, "Birthday added.")]
        }
        ("edit_birthday", [name, date]) => vec![describe(
            service.edit_birthday(name, date)?,
            "Contact birthday changed.",
        )],
        ("show_birthday", []) => service
            .birthdays()
            .into_iter()
            .map(|(name, birthday)| {
                let birthday = birthday.map_or_else(|| "-".to_string(), |b| b.render());
                format!("Name: {name}, Birthday: {birthday}")
            })
            .collect(),
        ("upcoming_birthdays", rest) => {
            let days = match rest {
                [] => horizon_days,
                [days] => days.parse::<u32>()?,
                _ => bail!("usage: upcoming_birthdays [days]"),
            };
            upcoming_lines(service, today, days)
        }
        _ => vec!["Unknown command.".to_string(), USAGE.to_string()],
    };
    Ok((Flow::Continue, output))
}

fn upcoming_lines(service: &ContactService, today: NaiveDate, days: u32) -> Vec<String> {
    let report = service.upcoming_birthdays(today, days);
    let mut lines: Vec<String> = report
        .rejected
        .iter()
        .map(|rejection| format!("Skipping {}: {}", rejection.name, rejection.error))
        .collect();
    if report.upcoming.is_empty() {
        lines.push(format!("No upcoming birthdays in the next {days} days."));
    } else {
        lines.push(format!("Upcoming birthdays in the next {days} days:"));
        lines.extend(
            report
                .upcoming
                .iter()
                .map(|entry| format!("{}: {}", entry.name, entry.congratulation_date)),
        );
    }
    lines
}

fn describe(outcome: ChangeOutcome, applied: &str) -> String {
    match outcome {
        ChangeOutcome::Applied => applied.to_string(),
        ChangeOutcome::ContactNotFound => "Contact not found.".to_string(),
        ChangeOutcome::PhoneNotFound => "Phone number not found.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{run, Flow};
    use addrbook_core::ContactService;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn output(service: &mut ContactService, line: &str) -> Vec<String> {
        run(service, line, 7, today()).unwrap().1
    }

    #[test]
    fn session_flow_prints_expected_messages() {
        let mut service = ContactService::default();
        assert_eq!(output(&mut service, "add Ann 1111111111"), vec!["Contact added."]);
        assert_eq!(
            output(&mut service, "change_phone Ann 9999999999 2222222222"),
            vec!["Phone number not found."]
        );
        assert_eq!(
            output(&mut service, "add_birthday Ann 15.06.1990"),
            vec!["Birthday added."]
        );
        assert_eq!(
            output(&mut service, "upcoming_birthdays"),
            vec!["Upcoming birthdays in the next 7 days:", "Ann: 17.06.2024"]
        );
        assert_eq!(output(&mut service, "show Bob"), vec!["Contact not found."]);
    }

    #[test]
    fn remove_phone_reports_each_outcome() {
        let mut service = ContactService::default();
        output(&mut service, "add Ann 1111111111");
        output(&mut service, "add_phone Ann 2222222222");

        assert_eq!(
            output(&mut service, "remove_phone Ann 1111111111"),
            vec!["Phone number removed."]
        );
        assert_eq!(
            output(&mut service, "remove_phone Ann 1111111111"),
            vec!["Phone number not found."]
        );
        assert_eq!(
            output(&mut service, "remove_phone Bob 2222222222"),
            vec!["Contact not found."]
        );
        assert_eq!(
            output(&mut service, "show Ann"),
            vec!["Contact name: Ann, phones: 2222222222, birthday: -"]
        );
    }

    #[test]
    fn quoted_names_may_contain_spaces() {
        let mut service = ContactService::default();
        assert_eq!(
            output(&mut service, r#"add "John Smith" 1111111111"#),
            vec!["Contact added."]
        );
        assert_eq!(
            output(&mut service, "change_name 'John Smith' 'Johnny Smith'"),
            vec!["Contact name changed."]
        );
        assert_eq!(
            output(&mut service, r#"show "Johnny Smith""#),
            vec!["Contact name: Johnny Smith, phones: 1111111111, birthday: -"]
        );
        assert_eq!(output(&mut service, "show John"), vec!["Contact not found."]);
    }

    #[test]
    fn invalid_input_is_an_error_not_a_panic() {
        let mut service = ContactService::default();
        assert!(run(&mut service, "add Ann 123", 7, today()).is_err());
        assert!(run(&mut service, "upcoming_birthdays soon", 7, today()).is_err());
        assert!(run(&mut service, r#"show "Ann"#, 7, today()).is_err());
    }

    #[test]
    fn exit_and_blank_lines_control_flow() {
        let mut service = ContactService::default();
        assert_eq!(run(&mut service, "  ", 7, today()).unwrap().0, Flow::Continue);
        assert_eq!(run(&mut service, "CLOSE", 7, today()).unwrap().0, Flow::Exit);
        assert_eq!(
            output(&mut service, "dance")[0],
            "Unknown command.".to_string()
        );
    }
}
