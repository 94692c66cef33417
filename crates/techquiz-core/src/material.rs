//! Course reference material and prompt construction.
//!
//! Each level is grounded in a fixed block of texts, grammar rules and
//! vocabulary. The prompt asks the model to build its scenario strictly from
//! that block.

use crate::model::{Level, Topic};

/// Role given to the model as its system instruction.
pub const SYSTEM_PROMPT: &str = "You are an ESP (English for Specific Purposes) Game Master for technical professionals (IT, Safety, Logistics). You write short multiple-choice scenarios that train technical English.";

const LEVEL_A_MATERIAL: &str = r#"SOURCE MATERIAL (PDF 3 - EJE 3):
1. Text: "A Day in Alex - IT Project Coordinator". Alex is checking dashboards, reviewing emails, sending instructions.
2. Grammar:
   - Present Continuous for actions happening NOW (am/is/are + ing).
   - Prepositions of Time (AT + exact time, ON + day, IN + month/year).
   - Prepositions of Place (ON the table, IN the room, AT the station).
   - Quantifiers: Countable (Many, A few) vs Uncountable (Much, A little, A lot of).
3. Technical Vocabulary: Dashboard, Server, Bug, Workflow, Developer, PPE (Boots, Helmet, Goggles), Hazard (Biological, Chemical), Forklift."#;

const LEVEL_B_MATERIAL: &str = r#"SOURCE MATERIAL (PDF 1 - EJE 4):
1. Text: "Laura's Day". She arrived, checked laptop, didn't have coffee (Past Simple).
2. Text: "An Agile Morning". Team was having a meeting, developers were writing code (Past Continuous).
3. Grammar:
   - Past Simple: Completed actions (Regular -ed / Irregular verbs).
   - Past Continuous: Actions in progress in the past (was/were + ing).
   - Modals: MUST (strong obligation/prohibition), SHOULD (advice), CAN/COULD (ability/possibility), HAVE TO (external obligation).
4. Technical Vocabulary: Compliance, Audit, Drill, Incident, Maintenance, Firewall, Sensor."#;

const LEVEL_C_MATERIAL: &str = r#"SOURCE MATERIAL (PDF 2 - Future & Prepositions):
1. Text: "The Future of Work and AI". AI is going to change jobs. Companies will use AI. New jobs will appear.
2. Grammar:
   - Will: Spontaneous decisions, predictions without evidence, promises.
   - Going to: Plans, intentions, predictions WITH evidence.
   - Present Continuous for Future: Fixed arrangements (time/place).
   - Prepositions: TO (Destination, Recipient, Purpose with verb) vs FOR (Benefit, Duration, Purpose with noun/-ing).
3. Technical Vocabulary: Algorithm, Automation, Cloud Computing, Data Mining, Supply Chain, Logistics."#;

/// The reference block a level's scenarios must be grounded in.
pub fn reference_material(level: Level) -> &'static str {
    match level {
        Level::A => LEVEL_A_MATERIAL,
        Level::B => LEVEL_B_MATERIAL,
        Level::C => LEVEL_C_MATERIAL,
    }
}

/// Build the user prompt for one scenario request.
pub fn build_prompt(level: Level, topic: Topic) -> String {
    format!(
        "Generate a multiple-choice scenario based STRICTLY on the following material.\n\
         \n\
         Selected Level: {level}\n\
         Technical Field: {topic}\n\
         \n\
         {material}\n\
         \n\
         Requirements:\n\
         1. Context: Create a short professional scenario (2 sentences) relevant to the Technical Field and the Text Context provided above.\n\
         2. Question: Ask a grammar or vocabulary question based on the rules in the Source Material.\n\
         3. Options: Provide exactly 3 options with ids \"1\", \"2\" and \"3\". Exactly one is correct, two are distractors.\n\
         4. Feedback: Explain the answer using the specific grammar rule mentioned in the Source Material (e.g., \"Use 'at' for precise times\").\n\
         5. Output: JSON matching the provided schema. English ONLY.\n",
        level = level,
        topic = topic.label(),
        material = reference_material(level),
    )
}
