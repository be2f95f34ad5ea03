/// Route an illness description to the clinician who handles it.
/// Orthopedic complaints (ACL, joint pain) go to Dr. Jonas; everything else
/// to Dr. Katherine. Total: every input gets a clinician.
pub fn assign_doctor(illness: &str) -> &'static str {
    let illness = illness.to_lowercase();
    if illness.contains("acl") || illness.contains("joint pain") {
        "Dr. Jonas"
    } else {
        "Dr. Katherine"
    }
}
