use crate::domain::model::{format_percent, PatientRecord};

/// 依關鍵字回答使用者對報告的提問，規則依序比對
pub fn advise(question: &str, name: &str, risk: f64, record: &PatientRecord) -> String {
    let text = question.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if mentions(&["hello", "hi", "help"]) {
        return format!(
            "Hello {}. I have analyzed your cardiovascular report. Your calculated risk is {}. \
             I am here to explain your results or offer advice. What would you like to know?",
            name,
            format_percent(risk)
        );
    }

    if mentions(&["why", "risk", "score"]) {
        return explain_risk(risk, record);
    }

    if mentions(&["eat", "diet", "food"]) {
        if record.cholesterol > 1.0 || record.gluc > 1.0 {
            return "Since your biomarkers for cholesterol or glucose are elevated, I recommend a diet \
                    low in saturated fats and added sugars. Focus on leafy greens, whole grains, and lean proteins."
                .to_string();
        }
        return "A balanced diet is key. Maintain a colorful plate with plenty of vegetables, fruits, \
                and heart-healthy fats like olive oil and avocados."
            .to_string();
    }

    if mentions(&["exercise", "run", "active"]) {
        if record.is_active() {
            return "You are already active, which is fantastic! Aim for 150 minutes of moderate \
                    activity per week to maintain this protection."
                .to_string();
        }
        return "I noticed you listed yourself as inactive. Starting small, like a 30-minute daily walk, \
                can reduce your heart disease risk by up to 20%."
            .to_string();
    }

    if mentions(&["smoke", "smoking", "alcohol", "drink"]) {
        if record.is_smoker() {
            return "Smoking is the single biggest modifiable risk factor. Quitting today can immediately \
                    lower your blood pressure and heart rate."
                .to_string();
        }
        if record.drinks_alcohol() {
            return "Alcohol should be consumed in moderation. Excessive intake can raise blood pressure."
                .to_string();
        }
        return "You reported no smoking or alcohol issues, which is excellent for your long-term heart health."
            .to_string();
    }

    "I didn't quite catch that context. You can ask me about your 'Risk Factors', \
     'Diet Recommendations', or 'Exercise Advice'."
        .to_string()
}

fn explain_risk(risk: f64, record: &PatientRecord) -> String {
    let mut reasons = Vec::new();
    if risk > 0.5 {
        reasons.push("Overall, your calculated risk is above normal.".to_string());
    }
    if record.ap_hi > 130.0 {
        reasons.push(format!(
            "Your systolic blood pressure is {}, which is considered elevated.",
            record.ap_hi
        ));
    }
    if record.cholesterol > 1.0 {
        reasons.push("Your cholesterol levels are flagged as above normal.".to_string());
    }
    if record.is_smoker() {
        reasons.push("Smoking is a significant contributor to your risk score.".to_string());
    }
    if record.bmi() > 25.0 {
        reasons.push(
            "Your BMI suggests you are overweight, which adds strain to your heart.".to_string(),
        );
    }

    if reasons.is_empty() {
        return "Your risk is quite low! You are doing a great job maintaining your health. \
                Keep up the active lifestyle."
            .to_string();
    }
    format!("Based on your data: {}", reasons.join(" "))
}
