//! `flickr.groups.*`

use std::sync::Arc;

use crate::client::Core;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::mapping;
use crate::types::Group;

pub const METHOD_GET_INFO: &str = "flickr.groups.getInfo";
pub const METHOD_SEARCH: &str = "flickr.groups.search";

#[derive(Debug)]
pub struct GroupsInterface {
    core: Arc<Core>,
}

impl GroupsInterface {
    pub(crate) fn new(core: Arc<Core>) -> Self {
        Self { core }
    }

    pub fn get_info(&self, group_id: &str) -> Result<Group> {
        let request = self.core.request(METHOD_GET_INFO).param("group_id", group_id);
        self.core.call(HttpMethod::Get, request, mapping::group)
    }

    /// Search public groups by name and description.
    pub fn search(&self, text: &str, per_page: u32, page: u32) -> Result<Vec<Group>> {
        let request = self
            .core
            .request(METHOD_SEARCH)
            .param("text", text)
            .param_positive("per_page", per_page)
            .param_positive("page", page);
        self.core
            .call(HttpMethod::Get, request, |groups| mapping::list(groups, "group", mapping::group))
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::Canned;

    #[test]
    fn get_info_reads_element_fields() {
        let (flickr, canned) = Canned::client(&[r#"<rsp stat="ok">
            <group id="34427465497@N01" iconserver="1">
                <name>GNEverybody</name>
                <description>The group for GNE players</description>
                <members>69</members>
                <privacy>3</privacy>
            </group>
        </rsp>"#]);
        let group = flickr.groups().get_info("34427465497@N01").unwrap();
        assert_eq!(group.id, "34427465497@N01");
        assert_eq!(group.name, "GNEverybody");
        assert_eq!(group.members, Some(69));
        assert_eq!(group.icon_server.as_deref(), Some("1"));
        assert_eq!(canned.last_param("group_id").as_deref(), Some("34427465497@N01"));
    }

    #[test]
    fn search_maps_results_in_order() {
        let (flickr, canned) = Canned::client(&[r#"<rsp stat="ok"><groups page="1" pages="1" perpage="2" total="2">
            <group nsid="3000@N02" name="Frito's Pals" eighteenplus="0"/>
            <group nsid="32825757@N00" name="Frito Pendejo!" eighteenplus="1"/>
        </groups></rsp>"#]);
        let groups = flickr.groups().search("frito", 2, 1).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id, "3000@N02");
        assert!(groups[1].eighteen_plus);
        let names: Vec<_> = canned.last_params().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["method", "api_key", "text", "per_page", "page"]);
    }
}
