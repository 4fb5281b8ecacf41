//! Response formatting
//!
//! The fixed markdown template wrapped around every model completion, and
//! the canned guidance returned when a question fails the relevance gate.
//! The template text matches the frontend's expectations verbatim.

use scholarbot_core::StudentProfile;

/// Guidance returned for questions outside the education/scholarship scope.
pub fn off_topic_guidance() -> String {
    "I can only assist with questions related to education, scholarships, \
     and student opportunities. Please ask questions within this scope. \
     For example, you can ask about:\n\
     - Scholarship eligibility\n\
     - Application processes\n\
     - Educational requirements\n\
     - Financial aid opportunities\n\
     - Academic programs\n\
     - Admission criteria"
        .to_string()
}

/// Wrap a model completion in the recommendation template: profile summary
/// table, the completion body, and the fixed documents/guidelines/tips
/// sections.
pub fn format_recommendation(profile: &StudentProfile, body: &str) -> String {
    let income = profile
        .income()
        .map(|v| format!("₹{} per annum", group_thousands(v)))
        .unwrap_or_else(|| "Not provided".to_string());
    let percentage = profile
        .percentage()
        .map(|v| format!("{v}%"))
        .unwrap_or_else(|| "Not provided".to_string());

    let template = format!(
        r#"## 🎓 Scholarship Recommendations

### 👤 Your Profile Summary
| Category | Details |
|----------|---------|
| 📚 Education | **{education}** |
| 💰 Income | **{income}** |
| 🏷️ Category | **{category}** |
| 📍 State | **{state}** |
| 📊 Academic Score | **{percentage}** |

### 📋 Available Scholarships
{body}

### 📝 Required Documents
- Valid ID Proof (Aadhar Card)
- Income Certificate
- Category Certificate (if applicable)
- Previous Year Marksheets
- Passport Size Photographs
- Bank Account Details
- Domicile Certificate

### ⚠️ Important Guidelines
1. **Verify Eligibility**: Double-check all criteria before applying
2. **Document Preparation**: Keep all documents scanned and ready
3. **Deadlines**: Submit applications well before due dates
4. **Information Accuracy**: Ensure all details are correctly filled
5. **Follow Up**: Track your application status regularly

### 💡 Pro Tips
- ✅ Apply to multiple scholarships to increase chances
- ✅ Set calendar reminders for deadlines
- ✅ Keep copies of all submitted documents
- ✅ Follow up on your applications regularly

### ❓ Need More Information?
You can ask about:
- 📌 Specific eligibility details
- 📌 Application procedures
- 📌 Document requirements
- 📌 Selection process
- 📌 Disbursement details

*Note: All scholarship amounts and criteria mentioned are subject to change. Please verify from official sources.*
"#,
        education = or_not_provided(&profile.education_level),
        income = income,
        category = or_not_provided(&profile.category),
        state = or_not_provided(&profile.state),
        percentage = percentage,
        body = body,
    );

    // Clean up any stray '#' characters that aren't part of headers
    template.replace("\n#\n", "\n").replace("\n# \n", "\n")
}

fn or_not_provided(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not provided"
    } else {
        value
    }
}

/// Format a non-negative amount with thousands separators ("250,000").
fn group_thousands(value: f64) -> String {
    let whole = value.trunc() as i64;
    let digits = whole.abs().to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
