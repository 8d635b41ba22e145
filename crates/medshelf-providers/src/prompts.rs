//! Prompts for prescription extraction and the chat assistant.

/// Instruction for reading medicine mentions off a prescription image.
///
/// The model must answer with parallel lists; alignment is repaired on our
/// side, so the prompt only has to keep the lists the same nominal length.
pub const EXTRACTION_PROMPT: &str = r#"You are a specialized pharmaceutical recognition system with expertise in reading doctors' prescriptions.

The attached image shows a handwritten prescription with medication names.

TASK:
1. Identify ALL medication names written in the prescription (not just one).
2. For each identified medication, provide:
   - fullname: The full medication name as written in the prescription (with proper spelling correction if needed).
   - name: The cleaned/normalized brand or generic name.
   - dosage_type: The dosage form (tablet, capsule, syrup, injection, etc.), or "unknown" if unclear.
   - strength: The strength of the medication (e.g., "500 mg", "10 ml"), or "unknown" if unclear.

IMPORTANT CONTEXT:
- Focus specifically on medication names.
- Medication names often include "Tab.", "Cap.", "Syp.", "Inj." etc.
- Strength must be numeric + unit (mg, ml, gm). If no clear number+unit is visible, use "unknown".
- Do not guess medicine names; if unclear, return "unknown".
- Extract ALL medicines, not just the first one.
- There is no medicine named Ts/Tas; if you read that, it is "Tab." or "tablet".

OUTPUT FORMAT:
Return the result strictly in this JSON format with lists:

{
  "fullname": ["Tab. Napa 500 mg", "Cap. Maxpro 20 mg"],
  "name": ["Napa", "Maxpro"],
  "dosage_type": ["tablet", "capsule"],
  "strength": ["500 mg", "20 mg"]
}
"#;

/// System instruction for the chat assistant, grounded in the most recent
/// prescription report when one exists.
pub fn chat_system_instruction(medicine_information: Option<&str>) -> String {
    match medicine_information {
        Some(info) => format!(
            "Here are the patient prescription information: {}",
            info
        ),
        None => "No prescription has been analyzed yet. Answer general medicine questions carefully and suggest uploading a prescription image for specific advice.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prompt_names_all_fields() {
        assert!(EXTRACTION_PROMPT.contains("fullname"));
        assert!(EXTRACTION_PROMPT.contains("dosage_type"));
        assert!(EXTRACTION_PROMPT.contains("strength"));
        assert!(EXTRACTION_PROMPT.contains("JSON"));
    }

    #[test]
    fn test_chat_instruction_with_context() {
        let instruction =
            chat_system_instruction(Some("medicine_1: name=Napa, strength=500 mg"));
        assert!(instruction.contains("prescription information"));
        assert!(instruction.contains("Napa"));
    }

    #[test]
    fn test_chat_instruction_without_context() {
        let instruction = chat_system_instruction(None);
        assert!(instruction.contains("No prescription"));
    }
}
