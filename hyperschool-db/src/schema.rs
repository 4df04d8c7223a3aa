table! {
    course_teachers (course_id, teacher_id) {
        course_id -> Int4,
        teacher_id -> Int4,
    }
}

table! {
    courses (id) {
        id -> Int4,
        title -> Varchar,
        info -> Text,
        duration_months -> Int4,
        price -> Int4,
    }
}

table! {
    student_courses (student_id, course_id) {
        student_id -> Int4,
        course_id -> Int4,
    }
}

table! {
    students (id) {
        id -> Int4,
        name -> Varchar,
        surname -> Varchar,
        age -> Int4,
    }
}

table! {
    teachers (id) {
        id -> Int4,
        name -> Varchar,
        surname -> Varchar,
        age -> Int4,
        about -> Text,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        hash_pwd -> Varchar,
        user_role -> Varchar,
        is_active -> Bool,
        date_joined -> Timestamp,
        last_login -> Nullable<Timestamp>,
    }
}

joinable!(course_teachers -> courses (course_id));
joinable!(course_teachers -> teachers (teacher_id));
joinable!(student_courses -> courses (course_id));
joinable!(student_courses -> students (student_id));

allow_tables_to_appear_in_same_query!(
    course_teachers,
    courses,
    student_courses,
    students,
    teachers,
    users,
);
