/// Anything that is stored in a repository and can be looked up by its id
pub trait Entity {
    fn id(&self) -> &str;
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
