//! Sample co-change files and descriptors shaped like real miner output.
#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub const SERVICE_RUN: &str =
    "src/main/java/org/acme/org_acme_Service.java/[CN]/Service/[MT]/run(java.lang.String,int)/body";
pub const SERVICE_FIELD: &str = "src/main/java/org/acme/org_acme_Service.java/[CN]/Service/[FE]/count";
pub const REPO_FIND: &str =
    "src/main/java/org/acme/org_acme_Repo.java/[CN]/Repo/[MT]/find(java.util.Map<java.lang.String,java.lang.Long>)/parameters";
pub const NESTED_HANDLER: &str =
    "src/main/java/org/acme/org_acme_Outer.java/[CN]/Outer/[CN]/Inner/[CN]/handle(org.acme.Event)";

/// Three records separated by blank and whitespace-only lines.
pub fn mixed_dependency_file() -> String {
    format!(
        "{SERVICE_RUN}\t{SERVICE_FIELD}\t{REPO_FIND}\t4\t0.75\t0\t9\n\
         \n\
         \t \n\
         {REPO_FIND}\t{SERVICE_RUN}\t2\t0.5\t1\t3\t42\n\
         {SERVICE_FIELD} {NESTED_HANDLER} 1 0.1 0 1\n"
    )
}

pub fn write_temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
