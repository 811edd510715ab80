//! The shared `User` domain.
//!
//! - `User { name: String, address: Address, manager: User }` with accessors
//!   `getAge(): Integer`, `isActive(): boolean` and `getName(): Object`
//!   (shadowed by the `name` field)
//! - `Address { city: String, street: String }` with `getZipCode(): String`
//! - `UserMapper` with the statements used in [`USER_MAPPER_XML`]

use crate::TypeModelBuilder;
use mapper_hir::TypeModel;

pub const PARAM_ANNOTATION: &str = "org.apache.ibatis.annotations.Param";

pub fn user_model() -> TypeModel {
    TypeModelBuilder::new()
        .class("com.example.User")
        .field("name", "java.lang.String")
        .field("address", "com.example.Address")
        .field("manager", "com.example.User")
        .getter("getAge", "java.lang.Integer")
        .getter("isActive", "boolean")
        .getter("getName", "java.lang.Object")
        .class("com.example.Address")
        .field("city", "java.lang.String")
        .field("street", "java.lang.String")
        .getter("getZipCode", "java.lang.String")
        .class("com.example.UserMapper")
        .method(
            "findByUser",
            &[("user", "com.example.User", Some((PARAM_ANNOTATION, Some("user"))))],
        )
        .method(
            "search",
            &[
                ("user", "com.example.User", Some((PARAM_ANNOTATION, Some("u")))),
                ("limit", "int", Some(("Param", None))),
                ("offset", "int", None),
            ],
        )
        .method("countAll", &[])
        .build()
}

/// A mapper for `com.example.UserMapper`.
pub const USER_MAPPER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE mapper PUBLIC "-//mybatis.org//DTD Mapper 3.0//EN" "http://mybatis.org/dtd/mybatis-3-mapper.dtd">
<mapper namespace="com.example.UserMapper">
  <resultMap id="userMap" type="com.example.User">
    <result property="name" column="name"/>
  </resultMap>
  <select id="findByUser" resultMap="userMap">
    SELECT * FROM users WHERE name = #{user.name}
  </select>
  <select id="search" resultMap="userMap">
    SELECT * FROM users LIMIT #{limit}
  </select>
  <select id="countAll" resultType="int">
    SELECT count(*) FROM users
  </select>
</mapper>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_model_shape() {
        let model = user_model();
        assert_eq!(model.len(), 3);
        let mapper = model.resolve("com.example.UserMapper").unwrap();
        assert_eq!(mapper.methods.len(), 3);
        assert_eq!(mapper.methods[1].parameters[2].annotations.len(), 0);
    }
}
