//! String transformation utilities for template names and titles

/// Converts a kebab-case purpose into space-separated title case.
///
/// Dashes become spaces. Every alphabetic run starts with an uppercase letter
/// and continues in lowercase, so digits and punctuation act as word breaks.
///
/// # Examples
/// ```
/// use template_manager::core::utils::purpose_to_title;
///
/// assert_eq!(purpose_to_title("simple-deploy"), "Simple Deploy");
/// assert_eq!(purpose_to_title("EKS-stack"), "Eks Stack");
/// assert_eq!(purpose_to_title("s3bucket"), "S3Bucket");
/// ```
pub fn purpose_to_title(purpose: &str) -> String {
    let mut result = String::with_capacity(purpose.len());
    let mut prev_is_alpha = false;

    for ch in purpose.chars() {
        let ch = if ch == '-' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_is_alpha {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            result.push(ch);
            prev_is_alpha = false;
        }
    }

    result
}
