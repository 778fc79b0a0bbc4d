use uuid::Uuid;

pub type Program = String;
pub type Args = Vec<String>;
pub type Pid = u32;
pub type RunId = Uuid;
pub type WorkerId = usize;
