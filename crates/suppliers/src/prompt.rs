//! Prompt sent to the analysis model.

/// Build the analysis prompt for a batch of PGNs. An empty username is
/// addressed as "the user".
pub fn analysis_prompt(pgns: &[String], username: &str) -> String {
    let player = match username.trim() {
        "" => "the user",
        name => name,
    };
    let games = pgns.join("\n---\n");

    format!(
        r#"You are an experienced chess coach. Study the following games played by "{player}" and find the recurring strategic themes, tactical patterns and mistakes that show up across ALL of them.

The games are in PGN format, separated by "---":
{games}

Analyze every game from the point of view of "{player}". If that name matches neither player, analyze the player who made the most significant blunders.
Reply with a single JSON object and nothing else: no markdown, no commentary outside the JSON.

The JSON object must have exactly this shape:
{{
  "playerName": "Name of the analyzed player.",
  "overallSummary": "Short summary of the player's style, strengths and most important recurring weaknesses.",
  "recurringThemes": [
    {{
      "title": "Short name of a recurring weakness, e.g. 'Neglecting King Safety'.",
      "description": "How the weakness shows up in these games and how to improve.",
      "examples": [
        {{
          "gameDescription": "Short label for the game, built from the White, Black and Date headers.",
          "moveNumber": 12,
          "moveNotation": "The mistaken move in standard algebraic notation, e.g. 'Nf3'.",
          "fenBeforeMove": "Full six-field FEN of the position *before* the mistake.",
          "fenAfterMove": "Full six-field FEN of the position *after* the mistake was played.",
          "suggestedMove": "A better move from fenBeforeMove in standard algebraic notation, e.g. 'Be2'.",
          "explanation": "Why this move illustrates the theme and why the suggestion is better.",
          "playerColor": "'w' if the analyzed player had White in this game, 'b' if Black."
        }}
      ]
    }}
  ]
}}

Pick the 2-3 most important recurring themes and give 1-2 concrete examples from the games for each. Every field must be filled in."#
    )
}
