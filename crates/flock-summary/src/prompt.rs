//! Prompt assembly for interaction-history summaries.

use flock_core::interaction::Interaction;

pub const SYSTEM_PROMPT: &str = "You are an assistant helping church \
                                 ministry leaders care for their volunteers. \
                                 Be concise, pastoral, and practical.";

/// Render one interaction as a single history line.
fn history_line(interaction: &Interaction) -> String {
  let mut line = format!(
    "[{}] {}",
    interaction.interaction_date.format("%Y-%m-%d"),
    interaction.discussion_notes
  );
  if !interaction.topics.is_empty() {
    line.push_str(&format!(" Topics: {}", interaction.topics.join(", ")));
  }
  line
}

/// Build the user prompt from a volunteer's name, their interaction history,
/// and an optional focus request.
pub fn build_prompt(
  volunteer_name: &str,
  interactions: &[Interaction],
  focus: Option<&str>,
) -> String {
  let history = interactions
    .iter()
    .map(history_line)
    .collect::<Vec<_>>()
    .join("\n");

  let mut prompt = format!(
    "Summarize the interaction history with volunteer {volunteer_name}.\n\n\
     Interaction history:\n{history}\n"
  );

  if let Some(focus) = focus {
    prompt.push_str(&format!("\nPay particular attention to: {focus}\n"));
  }

  prompt.push_str(
    "\nWrite a short summary covering the key themes, how this volunteer is \
     doing, and any recommended next steps for their ministry leader.",
  );
  prompt
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use uuid::Uuid;

  use super::*;

  fn interaction(
    date: (i32, u32, u32),
    notes: &str,
    topics: &[&str],
  ) -> Interaction {
    Interaction {
      interaction_id: Uuid::new_v4(),
      volunteer_id: Uuid::new_v4(),
      member_id: None,
      interaction_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap(),
      discussion_notes: notes.into(),
      topics: topics.iter().map(|t| t.to_string()).collect(),
      needs_followup: false,
      followup_date: None,
      followup_notes: None,
      followup_completed: false,
      followup_completed_date: None,
      created_at: chrono::Utc::now(),
      updated_at: chrono::Utc::now(),
    }
  }

  #[test]
  fn history_lines_carry_date_notes_and_topics() {
    let prompt = build_prompt(
      "Grace Kim",
      &[
        interaction((2025, 6, 1), "talked after rehearsal", &[
          "scheduling",
          "burnout",
        ]),
        interaction((2025, 6, 15), "quick check-in call", &[]),
      ],
      None,
    );

    assert!(prompt.contains("volunteer Grace Kim"));
    assert!(
      prompt
        .contains("[2025-06-01] talked after rehearsal Topics: scheduling, burnout")
    );
    assert!(prompt.contains("[2025-06-15] quick check-in call\n"));
  }

  #[test]
  fn topics_suffix_is_omitted_when_empty() {
    let line = history_line(&interaction((2025, 6, 15), "brief chat", &[]));
    assert_eq!(line, "[2025-06-15] brief chat");
  }

  #[test]
  fn focus_request_is_included_when_present() {
    let with = build_prompt(
      "Sam Okafor",
      &[interaction((2025, 5, 2), "notes", &[])],
      Some("signs of burnout"),
    );
    assert!(with.contains("Pay particular attention to: signs of burnout"));

    let without =
      build_prompt("Sam Okafor", &[interaction((2025, 5, 2), "notes", &[])], None);
    assert!(!without.contains("Pay particular attention"));
  }
}
